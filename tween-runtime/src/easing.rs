//! # Easing 模块
//!
//! 原始缓动函数表。每个函数把归一化进度（以及可选的形状参数 `x`）映射为新的标量。
//!
//! 函数本身不做 clamp，进度的截断由动画循环在调用前完成。

use std::f64::consts::{LOG10_E, PI};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;

/// bounce 迭代上限
const BOUNCE_MAX_ITERATIONS: usize = 32;

/// 缓动函数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EasingKind {
    /// 线性（恒等）
    #[default]
    Linear,
    /// 幂函数，`x` 为指数
    Quadrantic,
    /// 圆弧
    Circ,
    /// 回弹（先后退再前进）
    Backbow,
    /// 弹跳
    Bounce,
    /// 弹性，`x` 调节频率
    Elastic,
    /// 固定指数 `log10(e)` 的曲线
    Custom,
}

impl EasingKind {
    /// 所有缓动函数，按表中顺序
    pub const ALL: [EasingKind; 7] = [
        EasingKind::Linear,
        EasingKind::Quadrantic,
        EasingKind::Circ,
        EasingKind::Backbow,
        EasingKind::Bounce,
        EasingKind::Elastic,
        EasingKind::Custom,
    ];

    /// 名称（与解析时使用的名称一致）
    pub fn name(&self) -> &'static str {
        match self {
            EasingKind::Linear => "linear",
            EasingKind::Quadrantic => "quadrantic",
            EasingKind::Circ => "circ",
            EasingKind::Backbow => "backbow",
            EasingKind::Bounce => "bounce",
            EasingKind::Elastic => "elastic",
            EasingKind::Custom => "custom",
        }
    }

    /// 按名称查找，未知名称返回 `None`
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// 计算缓动值
    ///
    /// # 参数
    /// - `progress`: 时间进度 (0.0 - 1.0)
    /// - `x`: 形状参数（只有 quadrantic / backbow / elastic 使用）
    pub fn apply(&self, progress: f64, x: f64) -> f64 {
        match self {
            EasingKind::Linear => progress,
            EasingKind::Quadrantic => progress.powf(x),
            EasingKind::Circ => 1.0 - progress.acos().sin(),
            EasingKind::Backbow => progress.powi(2) * ((x + 1.0) * progress - x),
            EasingKind::Bounce => bounce(progress),
            EasingKind::Elastic => {
                2.0_f64.powf(10.0 * (progress - 1.0)) * (20.0 * PI * x / 3.0 * progress).cos()
            }
            EasingKind::Custom => progress.powf(LOG10_E),
        }
    }
}

impl fmt::Display for EasingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 严格解析：未知名称返回错误（`get_delta` 使用的是静默回退到 linear 的版本）
impl FromStr for EasingKind {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| AnimationError::UnknownEasing {
            name: s.to_string(),
        })
    }
}

/// 弹跳
///
/// 寻找最小的 `a = Σb`（b 逐次减半）使 `p >= (7 - 4a) / 11`。
/// 对 [0, 1] 内的输入最多 4 次迭代即可命中；超出上限（负数或 NaN）时返回 0。
fn bounce(progress: f64) -> f64 {
    let mut a = 0.0;
    let mut b = 1.0;

    for _ in 0..BOUNCE_MAX_ITERATIONS {
        if progress >= (7.0 - 4.0 * a) / 11.0 {
            return -((11.0 - 6.0 * a - 11.0 * progress) / 4.0).powi(2) + b * b;
        }
        a += b;
        b /= 2.0;
    }

    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_linear() {
        let easing = EasingKind::Linear;
        assert_eq!(easing.apply(0.0, 1.0), 0.0);
        assert_eq!(easing.apply(0.5, 1.0), 0.5);
        assert_eq!(easing.apply(1.0, 1.0), 1.0);
    }

    #[test]
    fn test_circ_endpoints() {
        assert!(approx(EasingKind::Circ.apply(0.0, 1.0), 0.0));
        assert!(approx(EasingKind::Circ.apply(1.0, 1.0), 1.0));
    }

    #[test]
    fn test_quadrantic_uses_exponent() {
        assert!(approx(EasingKind::Quadrantic.apply(0.5, 2.0), 0.25));
        assert!(approx(EasingKind::Quadrantic.apply(0.5, 3.0), 0.125));
        assert!(approx(EasingKind::Quadrantic.apply(1.0, 5.0), 1.0));
    }

    #[test]
    fn test_backbow_overshoots_backwards() {
        let x = 1.5;
        assert!(approx(EasingKind::Backbow.apply(0.0, x), 0.0));
        assert!(approx(EasingKind::Backbow.apply(1.0, x), 1.0));
        // 前段为负值（先后退）
        assert!(EasingKind::Backbow.apply(0.3, x) < 0.0);
    }

    #[test]
    fn test_bounce_endpoints() {
        assert!(approx(EasingKind::Bounce.apply(0.0, 1.0), 0.0));
        assert!(approx(EasingKind::Bounce.apply(1.0, 1.0), 1.0));
    }

    #[test]
    fn test_bounce_terminates_on_whole_domain() {
        for i in 0..=1000 {
            let p = i as f64 / 1000.0;
            let v = EasingKind::Bounce.apply(p, 1.0);
            assert!(v.is_finite(), "bounce({p}) = {v}");
        }
    }

    #[test]
    fn test_bounce_fallback_on_malformed_input() {
        assert_eq!(EasingKind::Bounce.apply(-1.0, 1.0), 0.0);
        assert_eq!(EasingKind::Bounce.apply(f64::NAN, 1.0), 0.0);
    }

    #[test]
    fn test_elastic_formula() {
        // p = 1 时指数项为 1，只剩余弦项
        let expected = (20.0 * PI / 3.0).cos();
        assert!(approx(EasingKind::Elastic.apply(1.0, 1.0), expected));
        assert!(approx(EasingKind::Elastic.apply(0.0, 1.0), 2.0_f64.powi(-10)));
    }

    #[test]
    fn test_custom_exponent() {
        assert!(approx(EasingKind::Custom.apply(0.5, 1.0), 0.5_f64.powf(0.4342944819032518)));
        assert!(approx(EasingKind::Custom.apply(1.0, 1.0), 1.0));
        assert_eq!(EasingKind::Custom.apply(0.0, 1.0), 0.0);
    }

    #[test]
    fn test_finite_on_unit_interval() {
        for kind in EasingKind::ALL {
            for i in 0..=20 {
                let p = i as f64 / 20.0;
                assert!(kind.apply(p, 1.5).is_finite(), "{kind}({p})");
            }
        }
    }

    #[test]
    fn test_name_roundtrip() {
        for kind in EasingKind::ALL {
            assert_eq!(kind.name().parse::<EasingKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_strict_parse_rejects_unknown() {
        let err = "wobble".parse::<EasingKind>().unwrap_err();
        assert_eq!(
            err,
            AnimationError::UnknownEasing {
                name: "wobble".to_string()
            }
        );
        // 名称区分大小写
        assert!(EasingKind::lookup("Linear").is_none());
    }

    #[test]
    fn test_serde_names() {
        let kind: EasingKind = serde_json::from_str("\"backbow\"").unwrap();
        assert_eq!(kind, EasingKind::Backbow);
        assert_eq!(serde_json::to_string(&EasingKind::Elastic).unwrap(), "\"elastic\"");
    }
}
