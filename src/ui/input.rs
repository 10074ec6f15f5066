//! 输入映射 (Input -> NavigationEvent)
//!
//! 按键直接映射；鼠标按下/抬起之间的水平位移决定是点击还是滑动。

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use super::actions::{Direction, Effect, GesturePhase, NavigationEvent};
use super::indicator::PageIndicator;
use super::state::PageFlow;

/// 按键对应的导航事件
pub fn key_event(key: KeyCode) -> Option<NavigationEvent> {
    match key {
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => Some(NavigationEvent::Forward),
        KeyCode::Left | KeyCode::Char('h') => Some(NavigationEvent::Back),
        KeyCode::Enter => Some(NavigationEvent::PrimaryAction),
        KeyCode::Esc | KeyCode::Char('q') => Some(NavigationEvent::Close),
        KeyCode::Down | KeyCode::Char('j') => Some(NavigationEvent::ScrollDown),
        KeyCode::Up | KeyCode::Char('k') => Some(NavigationEvent::ScrollUp),
        _ => None,
    }
}

/// 把鼠标按下、拖动、抬起组合成点击或滑动手势
#[derive(Debug, Clone)]
pub struct GestureTracker {
    threshold: u16,
    origin: Option<Position>,
}

impl GestureTracker {
    pub fn new(threshold: u16) -> Self {
        Self {
            threshold: threshold.max(1),
            origin: None,
        }
    }

    pub fn mouse_event(&mut self, event: MouseEvent) -> Option<NavigationEvent> {
        let position = Position::new(event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.origin = Some(position);
                Some(NavigationEvent::Tap {
                    position,
                    phase: GesturePhase::Began,
                })
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let origin = self.origin?;
                Some(self.classify(origin, position, GesturePhase::Changed))
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let origin = self.origin.take()?;
                Some(self.classify(origin, position, GesturePhase::Ended))
            }
            MouseEventKind::ScrollDown => Some(NavigationEvent::ScrollDown),
            MouseEventKind::ScrollUp => Some(NavigationEvent::ScrollUp),
            _ => None,
        }
    }

    /// 手势被打断（如终端失去焦点）
    pub fn cancel(&mut self) -> Option<NavigationEvent> {
        let origin = self.origin.take()?;
        Some(NavigationEvent::Tap {
            position: origin,
            phase: GesturePhase::Cancelled,
        })
    }

    fn classify(&self, origin: Position, position: Position, phase: GesturePhase) -> NavigationEvent {
        let dx = i32::from(position.x) - i32::from(origin.x);
        if dx.unsigned_abs() < u32::from(self.threshold) {
            // 点击以按下的位置为准
            return NavigationEvent::Tap {
                position: origin,
                phase,
            };
        }
        // 向左拖动带出下一页
        let direction = if dx < 0 {
            Direction::Forward
        } else {
            Direction::Backward
        };
        NavigationEvent::Swipe { direction, phase }
    }
}

/// 把终端事件翻译成导航事件
pub fn translate(event: Event, tracker: &mut GestureTracker) -> Option<NavigationEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => key_event(key.code),
        Event::Mouse(mouse) => tracker.mouse_event(mouse),
        Event::Resize(width, height) => Some(NavigationEvent::Resize { width, height }),
        Event::FocusLost => tracker.cancel(),
        _ => None,
    }
}

/// 处理终端事件
pub fn handle_event<I: PageIndicator>(
    flow: &mut PageFlow<I>,
    tracker: &mut GestureTracker,
    event: Event,
    now: Instant,
) -> Vec<Effect> {
    match translate(event, tracker) {
        Some(event) => flow.handle(event, now),
        None => Vec::new(),
    }
}
