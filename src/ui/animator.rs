//! 转场动画
//!
//! 模仿模态弹出的上滑 / 下滑转场：
//! - Push: 新页面从下方（偏移自身高度）滑入到 0
//! - Pop: 旧页面从 0 滑出到自身高度，返回的页面事先垫在它下面
//! - None: 立即成功
//!
//! 每次转场都会且只会产出一次 [`Completion`]。调用方用时钟推进
//! [`Transition::advance`]，在拿到完成结果之前不得发起新的转场。

use std::time::{Duration, Instant};

use thiserror::Error;

/// 转场操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    None,
    Push,
    Pop,
    /// 封闭集合之外的操作，总是以失败结束
    #[allow(dead_code)]
    Unsupported,
}

/// 参与转场的页面区域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    /// 页面序号
    pub page: usize,
    pub height: u16,
    /// 垂直平移的行数，0 为原位
    pub offset: u16,
}

impl Surface {
    pub fn new(page: usize, height: u16) -> Self {
        Self {
            page,
            height,
            offset: 0,
        }
    }

    fn reset(&mut self) {
        self.offset = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("缺少转场所需的页面区域")]
    MissingSurface,
    #[error("不支持的转场操作")]
    UnsupportedOperation,
    #[error("转场被中断")]
    Interrupted,
}

/// 一次转场请求，交给动画器后即被消耗
#[derive(Debug, Clone)]
pub struct TransitionRequest {
    pub operation: Operation,
    pub duration: Duration,
    pub from: Option<Surface>,
    pub to: Option<Surface>,
}

/// 转场结束信号，归还两个页面区域
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub result: Result<(), TransitionError>,
    pub from: Option<Surface>,
    pub to: Option<Surface>,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    /// 不需要动画，下一次 advance 立即结束
    Immediate(Result<(), TransitionError>),
    Running { started: Instant },
    Done,
}

/// 动画器，只保存固定的时长
#[derive(Debug, Clone, Copy)]
pub struct Animator {
    duration: Duration,
}

impl Animator {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// 时长为零时不做动画
    pub fn is_instant(&self) -> bool {
        self.duration.is_zero()
    }

    pub fn animate(
        &self,
        operation: Operation,
        from: Option<Surface>,
        to: Option<Surface>,
        now: Instant,
    ) -> Transition {
        Transition::new(
            TransitionRequest {
                operation,
                duration: self.duration,
                from,
                to,
            },
            now,
        )
    }
}

/// 进行中的转场
#[derive(Debug, Clone)]
pub struct Transition {
    operation: Operation,
    duration: Duration,
    from: Option<Surface>,
    to: Option<Surface>,
    phase: Phase,
}

impl Transition {
    pub fn new(request: TransitionRequest, now: Instant) -> Self {
        let TransitionRequest {
            operation,
            duration,
            mut from,
            mut to,
        } = request;

        let phase = match operation {
            Operation::None => Phase::Immediate(Ok(())),
            Operation::Unsupported => Phase::Immediate(Err(TransitionError::UnsupportedOperation)),
            Operation::Push => match to.as_mut() {
                Some(to) => {
                    to.offset = to.height;
                    Phase::Running { started: now }
                }
                None => Phase::Immediate(Err(TransitionError::MissingSurface)),
            },
            Operation::Pop => match (from.as_mut(), to.is_some()) {
                (Some(from), true) => {
                    from.offset = 0;
                    Phase::Running { started: now }
                }
                _ => Phase::Immediate(Err(TransitionError::MissingSurface)),
            },
        };

        Self {
            operation,
            duration,
            from,
            to,
            phase,
        }
    }

    /// 从下到上的绘制顺序
    pub fn layers(&self) -> [Option<&Surface>; 2] {
        match self.operation {
            // 返回的页面垫在下面，被揭开而不是重绘
            Operation::Pop => [self.to.as_ref(), self.from.as_ref()],
            _ => [self.from.as_ref(), self.to.as_ref()],
        }
    }

    /// 推进动画，结束时返回一次完成信号，之后总是 None
    pub fn advance(&mut self, now: Instant) -> Option<Completion> {
        match self.phase {
            Phase::Done => None,
            Phase::Immediate(result) => Some(self.finish(result, false)),
            Phase::Running { started } => {
                let elapsed = now.saturating_duration_since(started);
                if elapsed >= self.duration {
                    return Some(self.finish(Ok(()), true));
                }
                let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
                self.apply(ease_in_out(t));
                None
            }
        }
    }

    /// 中断进行中的动画，以失败结束并复位页面区域
    pub fn cancel(&mut self) -> Option<Completion> {
        match self.phase {
            Phase::Done => None,
            Phase::Immediate(result) => Some(self.finish(result, false)),
            Phase::Running { .. } => Some(self.finish(Err(TransitionError::Interrupted), true)),
        }
    }

    fn apply(&mut self, progress: f32) {
        match self.operation {
            Operation::Push => {
                if let Some(to) = self.to.as_mut() {
                    to.offset = scale(to.height, 1.0 - progress);
                }
            }
            Operation::Pop => {
                if let Some(from) = self.from.as_mut() {
                    from.offset = scale(from.height, progress);
                }
            }
            Operation::None | Operation::Unsupported => {}
        }
    }

    fn finish(&mut self, result: Result<(), TransitionError>, animated: bool) -> Completion {
        self.phase = Phase::Done;
        if animated {
            // 无论成败都不给复用的页面区域留下残余偏移
            for surface in [self.from.as_mut(), self.to.as_mut()].into_iter().flatten() {
                surface.reset();
            }
        }
        Completion {
            result,
            from: self.from.take(),
            to: self.to.take(),
        }
    }
}

fn scale(height: u16, fraction: f32) -> u16 {
    (f32::from(height) * fraction.clamp(0.0, 1.0)).round() as u16
}

/// 缓入缓出曲线
fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DURATION: Duration = Duration::from_millis(300);

    fn animator() -> Animator {
        Animator::new(DURATION)
    }

    #[test]
    fn test_push_slides_up_from_below() {
        let now = Instant::now();
        let from = Surface::new(0, 20);
        let to = Surface::new(1, 20);
        let mut transition = animator().animate(Operation::Push, Some(from), Some(to), now);

        assert_eq!(transition.layers()[1].unwrap().offset, 20);

        assert!(transition.advance(now + Duration::from_millis(150)).is_none());
        let mid = transition.layers()[1].unwrap().offset;
        assert!(mid > 0 && mid < 20);

        let completion = transition.advance(now + DURATION).unwrap();
        assert_eq!(completion.result, Ok(()));
        assert_eq!(completion.to.unwrap().offset, 0);
    }

    #[test]
    fn test_push_without_destination_fails_untouched() {
        let now = Instant::now();
        let from = Surface {
            page: 0,
            height: 20,
            offset: 3,
        };
        let mut transition = animator().animate(Operation::Push, Some(from), None, now);

        let completion = transition.advance(now).unwrap();
        assert_eq!(completion.result, Err(TransitionError::MissingSurface));
        assert_eq!(completion.from, Some(from));
        assert!(completion.to.is_none());
    }

    #[test]
    fn test_pop_resets_surfaces_on_success() {
        let now = Instant::now();
        let from = Surface::new(2, 10);
        let to = Surface::new(1, 10);
        let mut transition = animator().animate(Operation::Pop, Some(from), Some(to), now);

        // 返回的页面垫在下层
        assert_eq!(transition.layers()[0].unwrap().page, 1);

        transition.advance(now + Duration::from_millis(200));
        assert!(transition.layers()[1].unwrap().offset > 0);

        let completion = transition.advance(now + Duration::from_secs(1)).unwrap();
        assert_eq!(completion.result, Ok(()));
        assert_eq!(completion.from.unwrap().offset, 0);
        assert_eq!(completion.to.unwrap().offset, 0);
    }

    #[test]
    fn test_pop_resets_surfaces_on_interruption() {
        let now = Instant::now();
        let mut transition = animator().animate(
            Operation::Pop,
            Some(Surface::new(2, 10)),
            Some(Surface::new(1, 10)),
            now,
        );
        transition.advance(now + Duration::from_millis(150));

        let completion = transition.cancel().unwrap();
        assert_eq!(completion.result, Err(TransitionError::Interrupted));
        assert_eq!(completion.from.unwrap().offset, 0);
        assert_eq!(completion.to.unwrap().offset, 0);
    }

    #[test]
    fn test_pop_requires_both_surfaces() {
        let now = Instant::now();
        let mut transition = animator().animate(Operation::Pop, Some(Surface::new(2, 10)), None, now);
        let completion = transition.advance(now).unwrap();
        assert_eq!(completion.result, Err(TransitionError::MissingSurface));

        // 只有返回的页面也不行，且不动它的偏移
        let to = Surface {
            page: 1,
            height: 10,
            offset: 4,
        };
        let mut transition = animator().animate(Operation::Pop, None, Some(to), now);
        assert!(transition.layers()[1].is_none());
        let completion = transition.advance(now).unwrap();
        assert_eq!(completion.result, Err(TransitionError::MissingSurface));
        assert!(completion.from.is_none());
        assert_eq!(completion.to, Some(to));
        assert!(transition.advance(now + DURATION).is_none());
    }

    #[test]
    fn test_none_and_unsupported() {
        let now = Instant::now();
        let mut none = animator().animate(Operation::None, None, None, now);
        assert_eq!(none.advance(now).unwrap().result, Ok(()));

        let mut unsupported = animator().animate(Operation::Unsupported, None, None, now);
        assert_eq!(
            unsupported.advance(now).unwrap().result,
            Err(TransitionError::UnsupportedOperation)
        );
    }

    #[test]
    fn test_completes_exactly_once() {
        let now = Instant::now();
        let mut transition =
            animator().animate(Operation::Push, None, Some(Surface::new(1, 5)), now);

        let completions = (0..10)
            .filter_map(|i| transition.advance(now + Duration::from_millis(100 * i)))
            .count();
        assert_eq!(completions, 1);
        assert!(transition.cancel().is_none());
    }
}
