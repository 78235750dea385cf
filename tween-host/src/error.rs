//! # Host Error 模块
//!
//! 定义宿主层的错误类型。

use thiserror::Error;
use tween_runtime::AnimationError;

use crate::config::ConfigError;

/// 宿主层错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    /// 动画参数错误
    #[error("动画错误: {0}")]
    Animation(#[from] AnimationError),

    /// 样式目标与端点形状不匹配
    #[error("样式 '{style}' 需要 {expected} 类型的端点，实际为 {actual}")]
    StyleShape {
        /// 样式目标
        style: String,
        /// 期望的形状
        expected: &'static str,
        /// 实际的形状
        actual: &'static str,
    },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// Result 类型别名
pub type HostResult<T> = Result<T, HostError>;
