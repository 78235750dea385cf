//! # Ease 模块
//!
//! 缓动方向组合：把一个基础缓动函数包装成 easeOut / easeInOut 曲线。

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// 进度变换函数 `progress -> progress'`
///
/// 内部是 `Rc<dyn Fn>`，克隆开销很小，可以在多个动画之间共享。
#[derive(Clone)]
pub struct Delta(Rc<dyn Fn(f64) -> f64>);

impl Delta {
    /// 包装任意进度变换函数
    pub fn new(f: impl Fn(f64) -> f64 + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// 线性（恒等）变换
    pub fn linear() -> Self {
        Self::new(|progress| progress)
    }

    /// 计算变换后的进度
    #[inline]
    pub fn apply(&self, progress: f64) -> f64 {
        (self.0)(progress)
    }
}

impl Default for Delta {
    fn default() -> Self {
        Self::linear()
    }
}

impl fmt::Debug for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Delta(..)")
    }
}

/// 缓动方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EaseMode {
    /// `p ↦ 1 - f(1 - p)`
    #[default]
    #[serde(rename = "easeOut")]
    EaseOut,
    /// 前半段 `f(2p) / 2`，后半段 `(2 - f(2(1 - p))) / 2`
    #[serde(rename = "easeInOut")]
    EaseInOut,
    /// 与 `EaseInOut` 相同的分段，但后半段使用第二条曲线
    #[serde(rename = "easeInOut_delta")]
    EaseInOutDelta,
    /// 原样返回基础函数
    #[serde(rename = "identity", other)]
    Identity,
}

impl EaseMode {
    /// 按名称解析，无法识别的名称一律视为 `Identity`
    pub fn from_name(name: &str) -> Self {
        match name {
            "easeOut" => EaseMode::EaseOut,
            "easeInOut" => EaseMode::EaseInOut,
            "easeInOut_delta" => EaseMode::EaseInOutDelta,
            _ => EaseMode::Identity,
        }
    }

    /// 名称
    pub fn name(&self) -> &'static str {
        match self {
            EaseMode::EaseOut => "easeOut",
            EaseMode::EaseInOut => "easeInOut",
            EaseMode::EaseInOutDelta => "easeInOut_delta",
            EaseMode::Identity => "identity",
        }
    }
}

/// 组合缓动方向
///
/// `second` 只在 `EaseInOutDelta` 中使用；缺省时后半段沿用 `delta`。
pub fn set_ease(mode: EaseMode, delta: Delta, second: Option<Delta>) -> Delta {
    match mode {
        EaseMode::EaseOut => Delta::new(move |progress| 1.0 - delta.apply(1.0 - progress)),
        EaseMode::EaseInOut => Delta::new(move |progress| {
            if progress < 0.5 {
                delta.apply(2.0 * progress) / 2.0
            } else {
                (2.0 - delta.apply(2.0 * (1.0 - progress))) / 2.0
            }
        }),
        EaseMode::EaseInOutDelta => {
            let second = second.unwrap_or_else(|| delta.clone());
            Delta::new(move |progress| {
                if progress < 0.5 {
                    delta.apply(2.0 * progress) / 2.0
                } else {
                    (2.0 - second.apply(2.0 * (1.0 - progress))) / 2.0
                }
            })
        }
        EaseMode::Identity => delta,
    }
}
