//! 导航逻辑 (Update/Dispatch)
//!
//! (state, event) -> (state, effects)。越界、找不到页面、转场失败都只记录日志，
//! 不改变 FlowState。

use std::time::Instant;

use ratatui::layout::{Position, Rect};
use tracing::{debug, info, warn};

use super::actions::{Direction, Effect, GesturePhase, NavigationEvent};
use super::animator::{Completion, Operation, Surface};
use super::indicator::PageIndicator;
use super::state::{PageFlow, PendingTransition};

/// 屏幕左侧这一比例内的点击视为返回
pub const BACK_ZONE: f32 = 0.25;

/// 按点击位置占视图宽度的比例决定方向，边界归前进
pub fn classify_tap(offset: f32) -> Direction {
    if offset < BACK_ZONE {
        Direction::Backward
    } else {
        Direction::Forward
    }
}

impl<I: PageIndicator> PageFlow<I> {
    /// 核心事件分发
    pub fn handle(&mut self, event: NavigationEvent, now: Instant) -> Vec<Effect> {
        match event {
            NavigationEvent::Appear => self.appear(),
            NavigationEvent::Forward => self.go_forward(now),
            NavigationEvent::Back => self.go_back(now),
            NavigationEvent::Swipe { direction, phase } => {
                if phase != GesturePhase::Ended {
                    return Vec::new();
                }
                self.go(direction, now);
            }
            NavigationEvent::Tap { position, phase } => return self.tap(position, phase, now),
            NavigationEvent::PrimaryAction => return self.primary_action(),
            NavigationEvent::Close => {
                info!(page = self.state.current, "关闭引导");
                return vec![Effect::Close];
            }
            NavigationEvent::ScrollUp => self.scroll_by(-1),
            NavigationEvent::ScrollDown => self.scroll_by(1),
            NavigationEvent::Resize { width, height } => {
                self.viewport = Rect::new(0, 0, width, height);
                self.interrupt();
            }
            NavigationEvent::Layout {
                page_area,
                body_area,
                scroll_indicator,
                button,
                close_control,
            } => {
                self.page_area = page_area;
                self.body_area = body_area;
                self.scroll_indicator = scroll_indicator;
                self.button = button;
                self.close_control = close_control;
                self.scroll = self.scroll.min(self.max_scroll());
            }
        }
        Vec::new()
    }

    /// 推进进行中的转场，返回是否仍在动画中
    pub fn tick(&mut self, now: Instant) -> bool {
        let completion = match self.pending.as_mut() {
            Some(pending) => pending.transition.advance(now),
            None => return false,
        };
        if let Some(completion) = completion
            && let Some(pending) = self.pending.take()
        {
            self.complete(pending, completion);
        }
        self.is_animating()
    }

    // ============ 导航 ============

    /// 首次显示，不经过动画直接放置第一页
    fn appear(&mut self) {
        if self.current_page.is_some() {
            return;
        }
        let Some(page) = self.provider.page(0) else {
            warn!("找不到第一页");
            return;
        };
        self.current_page = Some(page);
        self.state.current = 0;
        self.scroll = 0;
        self.indicator.set_page_count(self.state.total);
        self.indicator.set_current_page(0);
        debug!(total = self.state.total, "引导已显示");
    }

    pub fn go_forward(&mut self, now: Instant) {
        self.navigate(self.state.current.checked_add(1), Operation::Push, now);
    }

    pub fn go_back(&mut self, now: Instant) {
        self.navigate(self.state.current.checked_sub(1), Operation::Pop, now);
    }

    fn go(&mut self, direction: Direction, now: Instant) {
        match direction {
            Direction::Forward => self.go_forward(now),
            Direction::Backward => self.go_back(now),
        }
    }

    fn navigate(&mut self, target: Option<usize>, operation: Operation, now: Instant) {
        if self.current_page.is_none() {
            debug!("引导尚未显示，忽略导航");
            return;
        }
        if self.pending.is_some() {
            debug!("转场进行中，忽略导航");
            return;
        }
        let Some(target) = target.filter(|&target| target < self.state.total) else {
            debug!(current = self.state.current, "已到边界，忽略导航");
            return;
        };
        let Some(page) = self.provider.page(target) else {
            warn!(page = target, "找不到目标页面，放弃本次导航");
            return;
        };

        let height = self.page_area.height;
        let operation = if self.animator.is_instant() {
            Operation::None
        } else {
            operation
        };
        let transition = self.animator.animate(
            operation,
            Some(Surface::new(self.state.current, height)),
            Some(Surface::new(target, height)),
            now,
        );
        self.pending = Some(PendingTransition {
            target,
            page,
            transition,
        });
        // 零时长或无需动画的转场在这里立即结束
        self.tick(now);
    }

    /// 尺寸变化后旧的页面区域已失效，中断进行中的转场
    fn interrupt(&mut self) {
        let Some(mut pending) = self.pending.take() else {
            return;
        };
        if let Some(completion) = pending.transition.cancel() {
            self.complete(pending, completion);
        }
    }

    fn complete(&mut self, pending: PendingTransition, completion: Completion) {
        debug!(
            from = ?completion.from.map(|surface| surface.page),
            to = ?completion.to.map(|surface| surface.page),
            "转场结束"
        );
        if let Err(err) = completion.result {
            warn!(page = pending.target, %err, "转场失败，保持原页面");
            return;
        }
        // 以实际显示的页面为准同步序号
        let index = self.provider.index(&pending.page);
        self.state.current = index;
        self.current_page = Some(pending.page);
        self.scroll = 0;
        self.indicator.set_current_page(index);
        info!(page = index, "切换页面");
    }

    // ============ 点击 ============

    fn tap(&mut self, position: Position, phase: GesturePhase, now: Instant) -> Vec<Effect> {
        if phase != GesturePhase::Ended {
            return Vec::new();
        }
        // 控件优先于翻页区
        if self.close_control.is_some_and(|area| area.contains(position)) {
            info!(page = self.state.current, "点击关闭");
            return vec![Effect::Close];
        }
        if self.button.is_some_and(|area| area.contains(position)) {
            return self.primary_action();
        }
        if let Some(indicator) = self.scroll_indicator
            && indicator.contains(position)
        {
            self.jump_scroll(indicator, position);
            return Vec::new();
        }
        if self.viewport.width == 0 {
            debug!("视图宽度未知，忽略点击");
            return Vec::new();
        }
        let offset =
            f32::from(position.x.saturating_sub(self.viewport.x)) / f32::from(self.viewport.width);
        self.go(classify_tap(offset), now);
        Vec::new()
    }

    // ============ 主操作 ============

    fn primary_action(&mut self) -> Vec<Effect> {
        match self
            .current_page
            .as_ref()
            .and_then(|page| page.primary_action())
        {
            Some(effect) => {
                info!(page = self.state.current, "执行页面主操作");
                vec![*effect]
            }
            None => Vec::new(),
        }
    }

    // ============ 滚动 ============

    fn scroll_by(&mut self, delta: i32) {
        let scroll = (i32::from(self.scroll) + delta).clamp(0, i32::from(self.max_scroll()));
        self.scroll = u16::try_from(scroll).unwrap_or(0);
    }

    /// 点击滚动条时按点击位置跳转
    fn jump_scroll(&mut self, indicator: Rect, position: Position) {
        let max = self.max_scroll();
        let span = indicator.height.saturating_sub(1);
        if span == 0 {
            return;
        }
        let row = position.y.saturating_sub(indicator.y).min(span);
        let fraction = f32::from(row) / f32::from(span);
        self.scroll = (fraction * f32::from(max)).round() as u16;
        debug!(scroll = self.scroll, "点击滚动条");
    }
}
