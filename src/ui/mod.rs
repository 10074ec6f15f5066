//! 引导翻页模块
//!
//! 沿用 MVI 的划分：
//! - Model (state.rs): PageFlow 与 FlowState
//! - View (view/): 纯函数绘制，并把布局报告回控制器
//! - Intent (actions.rs, input.rs): 终端输入翻译成 NavigationEvent
//! - Update (logic.rs): handle(event) -> effects
//!
//! animator.rs、provider.rs、indicator.rs 是控制器依赖的三个叶子组件。

pub mod actions;
pub mod animator;
pub mod indicator;
pub mod input;
pub mod logic;
pub mod provider;
pub mod state;
pub mod view;

// Re-export for convenience
pub use actions::{Effect, NavigationEvent};
pub use input::{GestureTracker, handle_event};
pub use state::{FlowState, PageFlow};
pub use view::render;
