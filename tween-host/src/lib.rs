//! # Tween Host
//!
//! `tween-runtime` 的宿主层：把动画写到元素上，并提供真实时钟下的帧调度。
//!
//! ## 模块
//!
//! - [`element`]：元素抽象与记录型实现
//! - [`style`]：样式目标（平移 / 样式属性 / 自定义函数）
//! - [`extension`]：[`AnimatedElement`]，元素上的 `animate` / `cancel_animation`
//! - [`timer`]：定时器帧调度器与系统时钟
//! - [`config`]：宿主配置

pub mod config;
pub mod element;
pub mod error;
pub mod extension;
pub mod style;
pub mod timer;

pub use config::{ConfigError, DebugConfig, TweenConfig};
pub use element::{Element, ElementCall, RecordingElement};
pub use error::{HostError, HostResult};
pub use extension::AnimatedElement;
pub use style::{CustomStyleFn, StyleTarget};
pub use timer::{DEFAULT_FRAME_INTERVAL_MS, SystemClock, TimerScheduler};
