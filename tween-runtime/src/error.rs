//! # Error 模块
//!
//! 定义 tween-runtime 中使用的错误类型。

use thiserror::Error;

/// 动画错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// 起点与终点形状不一致（一个是标量，一个是二维点）
    #[error("起点与终点形状不一致：起点为 {start}，终点为 {end}")]
    ShapeMismatch {
        start: &'static str,
        end: &'static str,
    },

    /// 无效的时长
    #[error("无效的动画时长: {seconds} 秒")]
    InvalidDuration { seconds: f64 },

    /// 无效的延迟
    #[error("无效的动画延迟: {seconds} 秒")]
    InvalidDelay { seconds: f64 },

    /// 未知的缓动函数名称（仅严格解析时返回）
    #[error("未知的缓动函数 '{name}'")]
    UnknownEasing { name: String },
}

/// Result 类型别名
pub type TweenResult<T> = Result<T, AnimationError>;
