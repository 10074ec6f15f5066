//! 翻页流程状态 (Model)
//!
//! PageFlow 独占 FlowState，只有成功的页面切换才会修改它。

use ratatui::layout::Rect;

use super::actions::Effect;
use super::animator::{Animator, Transition};
use super::indicator::{DotIndicator, PageIndicator};
use super::provider::PageProvider;
use crate::models::Page;
use crate::storage::Config;

/// 当前页序号与总页数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowState {
    pub current: usize,
    pub total: usize,
}

/// 进行中的页面切换，动画成功结束后才提交
#[derive(Debug)]
pub struct PendingTransition {
    pub target: usize,
    pub page: Page<Effect>,
    pub transition: Transition,
}

/// 翻页流程控制器
pub struct PageFlow<I: PageIndicator = DotIndicator> {
    pub state: FlowState,
    pub provider: PageProvider<Effect>,
    pub animator: Animator,
    pub indicator: I,
    /// 首次显示之前为 None
    pub current_page: Option<Page<Effect>>,
    /// 当前页正文的滚动行数，切页后归零
    pub scroll: u16,
    pub viewport: Rect,
    pub page_area: Rect,
    pub body_area: Rect,
    /// 当前页的滚动条区域，点击落在其中时交给页面内容处理
    pub scroll_indicator: Option<Rect>,
    /// 主操作按钮区域，点击等同于主操作
    pub button: Option<Rect>,
    /// 顶栏关闭标签区域
    pub close_control: Option<Rect>,
    pub pending: Option<PendingTransition>,
}

impl PageFlow<DotIndicator> {
    pub fn new(config: &Config) -> Self {
        Self::with_indicator(config, DotIndicator::default())
    }
}

impl<I: PageIndicator> PageFlow<I> {
    pub fn with_indicator(config: &Config, indicator: I) -> Self {
        let provider = PageProvider::new(Effect::Close);
        Self {
            state: FlowState {
                current: 0,
                total: provider.page_count(),
            },
            provider,
            animator: Animator::new(config.transition_duration()),
            indicator,
            current_page: None,
            scroll: 0,
            viewport: Rect::default(),
            page_area: Rect::default(),
            body_area: Rect::default(),
            scroll_indicator: None,
            button: None,
            close_control: None,
            pending: None,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.pending.is_some()
    }

    /// 当前页正文可滚动的最大行数
    pub fn max_scroll(&self) -> u16 {
        let lines = self
            .current_page
            .as_ref()
            .map_or(0, |page| page.body().len());
        u16::try_from(lines)
            .unwrap_or(u16::MAX)
            .saturating_sub(self.body_area.height)
    }
}
