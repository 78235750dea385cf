//! # Tween Runtime
//!
//! 帧驱动补间动画的纯逻辑核心。
//!
//! ## 架构概述
//!
//! `tween-runtime` 不依赖任何 IO 或渲染环境，帧调度和时钟都通过 trait 注入：
//!
//! ```text
//! Caller                 Animation                 FrameScheduler / Clock
//!   │── animate() ───────►│                              │
//!   │                     │── tick（同步第一帧）          │
//!   │◄── step(ctx) ───────│                              │
//!   │                     │── request_frame ────────────►│
//!   │                     │◄────────────── callback(ts) ─│
//!   │◄── step / action ───│         ...                  │
//!   │◄── callback ────────│（progress == 1）              │
//! ```
//!
//! ## 核心类型
//!
//! - [`EasingKind`]：原始缓动函数表
//! - [`EaseMode`] / [`set_ease`]：缓动方向组合
//! - [`get_delta`] / [`set_delta`] / [`DeltaSpec`]：按名称解析缓动函数
//! - [`Animation`]：动画循环状态机
//! - [`FrameScheduler`] / [`Clock`]：宿主提供的帧调度与时钟
//!
//! ## 使用示例
//!
//! ```ignore
//! let scheduler = Rc::new(ManualScheduler::new());
//! let clock = Rc::new(ManualClock::new(0.0));
//! let animation = Animation::new(scheduler.clone(), clock.clone());
//!
//! animation.animate(
//!     AnimateOptions::new()
//!         .with_start(0.0)
//!         .with_end(100.0)
//!         .with_delta(set_delta(EaseMode::EaseOut, Some(&DeltaSpec::new("quadrantic", 2.0)), None))
//!         .with_step(|ctx| println!("{:?}", ctx.value())),
//! )?;
//!
//! scheduler.run_until_idle(&clock, 16.0, 1000);
//! ```

pub mod animation;
pub mod delta;
pub mod ease;
pub mod easing;
pub mod error;
pub mod params;
pub mod scheduler;
pub mod value;

// 重导出核心类型
pub use animation::{Animation, DEFAULT_DURATION_SECS, LoopState};
pub use delta::{DeltaSpec, get_delta, set_delta};
pub use ease::{Delta, EaseMode, set_ease};
pub use easing::EasingKind;
pub use error::{AnimationError, TweenResult};
pub use params::{AnimateOptions, AnimationParams, FrameHook, StepContext, StepFn, TweenFrame};
pub use scheduler::{Clock, FrameCallback, FrameHandle, FrameScheduler, ManualClock, ManualScheduler};
pub use value::{Point, TweenValue, get_value};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        // 验证所有公共类型都可以正常使用
        let _spec = DeltaSpec::named("bounce");
        let _mode = EaseMode::from_name("easeInOut");
        let _value = TweenValue::from((1.0, 2.0));
        let _options = AnimateOptions::new().with_end(1.0);
        let _state = LoopState::default();
    }
}
