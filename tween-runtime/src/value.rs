//! # Value 模块
//!
//! 动画起点/终点的取值：标量或二维点，以及两者之间的插值。

use serde::{Deserialize, Serialize};

use crate::error::{AnimationError, TweenResult};

/// 二维点
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// 创建新的点
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 线性插值
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: get_value(self.x, other.x, t),
            y: get_value(self.y, other.y, t),
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// 动画端点取值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TweenValue {
    /// 标量
    Scalar(f64),
    /// 二维点
    Point(Point),
}

impl Default for TweenValue {
    fn default() -> Self {
        TweenValue::Scalar(0.0)
    }
}

impl From<f64> for TweenValue {
    fn from(v: f64) -> Self {
        TweenValue::Scalar(v)
    }
}

impl From<Point> for TweenValue {
    fn from(p: Point) -> Self {
        TweenValue::Point(p)
    }
}

impl From<(f64, f64)> for TweenValue {
    fn from(p: (f64, f64)) -> Self {
        TweenValue::Point(p.into())
    }
}

impl TweenValue {
    /// 形状名称（用于错误信息）
    pub fn shape(&self) -> &'static str {
        match self {
            TweenValue::Scalar(_) => "scalar",
            TweenValue::Point(_) => "point",
        }
    }

    /// 标量值
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            TweenValue::Scalar(v) => Some(*v),
            TweenValue::Point(_) => None,
        }
    }

    /// 点值
    pub fn as_point(&self) -> Option<Point> {
        match self {
            TweenValue::Scalar(_) => None,
            TweenValue::Point(p) => Some(*p),
        }
    }

    /// 检查两个端点形状是否一致
    pub fn check_shape(&self, other: &TweenValue) -> TweenResult<()> {
        match (self, other) {
            (TweenValue::Scalar(_), TweenValue::Scalar(_))
            | (TweenValue::Point(_), TweenValue::Point(_)) => Ok(()),
            _ => Err(AnimationError::ShapeMismatch {
                start: self.shape(),
                end: other.shape(),
            }),
        }
    }

    /// 在 `self` 与 `end` 之间插值
    ///
    /// 形状不一致时返回错误。
    pub fn interpolate(&self, end: &TweenValue, delta: f64) -> TweenResult<TweenValue> {
        match (self, end) {
            (TweenValue::Scalar(a), TweenValue::Scalar(b)) => {
                Ok(TweenValue::Scalar(get_value(*a, *b, delta)))
            }
            (TweenValue::Point(a), TweenValue::Point(b)) => Ok(TweenValue::Point(a.lerp(*b, delta))),
            _ => Err(AnimationError::ShapeMismatch {
                start: self.shape(),
                end: end.shape(),
            }),
        }
    }
}

/// 当前值：`start + (end - start) * delta`
#[inline]
pub fn get_value(start: f64, end: f64, delta: f64) -> f64 {
    start + (end - start) * delta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_value() {
        assert_eq!(get_value(0.0, 100.0, 0.5), 50.0);
        assert_eq!(get_value(10.0, 20.0, 0.0), 10.0);
        assert_eq!(get_value(10.0, 20.0, 1.0), 20.0);
        // 超出 [0, 1] 的缓动值会越过终点
        assert_eq!(get_value(0.0, 10.0, 1.5), 15.0);
    }

    #[test]
    fn test_point_interpolation() {
        let a = TweenValue::from((0.0, 10.0));
        let b = TweenValue::from((100.0, 20.0));
        let mid = a.interpolate(&b, 0.5).unwrap();
        assert_eq!(mid, TweenValue::Point(Point::new(50.0, 15.0)));
    }

    #[test]
    fn test_shape_mismatch() {
        let a = TweenValue::from(1.0);
        let b = TweenValue::from((1.0, 2.0));
        assert_eq!(
            a.check_shape(&b),
            Err(AnimationError::ShapeMismatch {
                start: "scalar",
                end: "point"
            })
        );
        assert!(a.interpolate(&b, 0.5).is_err());
    }

    #[test]
    fn test_untagged_deserialize() {
        let v: TweenValue = serde_json::from_str("42.0").unwrap();
        assert_eq!(v.as_scalar(), Some(42.0));
        assert_eq!(v.as_point(), None);
        let v: TweenValue = serde_json::from_str(r#"{"x": 1.0, "y": 2.0}"#).unwrap();
        assert_eq!(v.as_point(), Some(Point::new(1.0, 2.0)));
        assert_eq!(v.as_scalar(), None);
    }
}
