//! # Delta 模块
//!
//! 按名称解析缓动函数并绑定形状参数，再与缓动方向组合成最终的进度变换。

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ease::{Delta, EaseMode, set_ease};
use crate::easing::EasingKind;

/// 缓动函数描述
///
/// `shape_param` 作为第二个参数传给缓动函数（quadrantic 的指数、elastic 的频率等）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaSpec {
    /// 缓动函数名称
    pub name: String,
    /// 形状参数
    #[serde(default = "default_shape_param")]
    pub shape_param: f64,
}

fn default_shape_param() -> f64 {
    1.0
}

impl DeltaSpec {
    /// 创建描述
    pub fn new(name: impl Into<String>, shape_param: f64) -> Self {
        Self {
            name: name.into(),
            shape_param,
        }
    }

    /// 使用默认形状参数
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, default_shape_param())
    }

    /// 解析为进度变换函数
    pub fn resolve(&self) -> Delta {
        get_delta(&self.name, self.shape_param)
    }
}

impl Default for DeltaSpec {
    fn default() -> Self {
        Self::named(EasingKind::Linear.name())
    }
}

/// 按名称获取缓动函数，并绑定形状参数 `x`
///
/// 未知名称静默回退到 linear，只留下一条 debug 日志。
/// 需要严格校验时使用 `name.parse::<EasingKind>()`。
pub fn get_delta(name: &str, x: f64) -> Delta {
    match EasingKind::lookup(name) {
        Some(EasingKind::Linear) => Delta::linear(),
        Some(kind) => Delta::new(move |progress| kind.apply(progress, x)),
        None => {
            debug!(name = %name, "未知的缓动函数，回退到 linear");
            Delta::linear()
        }
    }
}

/// 解析一到两个缓动函数描述并按方向组合
///
/// 第一个描述缺省时使用 linear。
pub fn set_delta(mode: EaseMode, first: Option<&DeltaSpec>, second: Option<&DeltaSpec>) -> Delta {
    let delta = first.map(DeltaSpec::resolve).unwrap_or_default();
    let second = second.map(DeltaSpec::resolve);
    set_ease(mode, delta, second)
}
