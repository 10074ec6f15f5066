//! 导航事件与副作用 (Intent)
//!
//! 输入层把按键、点击、滑动翻译成 NavigationEvent，
//! 控制器处理后返回 Effect 交给宿主执行。

use ratatui::layout::{Position, Rect};

/// 手势阶段，只有 Ended 会触发导航
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// 翻页方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// 导航事件
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationEvent {
    /// 首次显示，直接放置第一页
    Appear,
    Forward,
    Back,
    /// 水平滑动翻页
    Swipe {
        direction: Direction,
        phase: GesturePhase,
    },
    /// 点击，左侧 25% 返回，其余前进
    Tap {
        position: Position,
        phase: GesturePhase,
    },
    /// 当前页面的主操作（首页跳过、末页开始）
    PrimaryAction,
    /// 关闭按钮
    Close,
    ScrollUp,
    ScrollDown,
    /// 终端尺寸变化
    Resize { width: u16, height: u16 },
    /// 视图报告本帧的页面区域、正文区域以及可点击的控件区域
    Layout {
        page_area: Rect,
        body_area: Rect,
        scroll_indicator: Option<Rect>,
        /// 当前页面有主操作时才有按钮
        button: Option<Rect>,
        /// 顶栏的关闭标签
        close_control: Option<Rect>,
    },
}

/// 控制器请求宿主执行的副作用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// 通知宿主关闭引导，FlowState 保持不变
    Close,
}
