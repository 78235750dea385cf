//! # Style 模块
//!
//! 样式目标：决定每一帧的插值写到元素的哪里。

use std::fmt;
use std::rc::Rc;

use tween_runtime::{StepContext, TweenValue};

use crate::element::Element;
use crate::error::{HostError, HostResult};

/// 自定义样式函数，接收元素与当前帧上下文
pub type CustomStyleFn = Rc<dyn Fn(&dyn Element, &StepContext<'_>)>;

/// 样式目标
#[derive(Clone)]
pub enum StyleTarget {
    /// 水平平移
    X,
    /// 垂直平移
    Y,
    /// 二维平移，端点必须是点
    Xy,
    /// 样式属性，值会拼接单位后缀
    Property(String),
    /// 自定义函数
    Custom(CustomStyleFn),
}

impl StyleTarget {
    /// 从字符串解析：`"x"`、`"y"`、`"xy"`，其它都视为样式属性名
    pub fn parse(s: &str) -> Self {
        match s {
            "x" => StyleTarget::X,
            "y" => StyleTarget::Y,
            "xy" => StyleTarget::Xy,
            name => StyleTarget::Property(name.to_string()),
        }
    }

    /// 自定义样式函数
    pub fn custom(f: impl Fn(&dyn Element, &StepContext<'_>) + 'static) -> Self {
        StyleTarget::Custom(Rc::new(f))
    }

    /// 名称（用于日志和错误信息）
    pub fn name(&self) -> &str {
        match self {
            StyleTarget::X => "x",
            StyleTarget::Y => "y",
            StyleTarget::Xy => "xy",
            StyleTarget::Property(name) => name,
            StyleTarget::Custom(_) => "<custom>",
        }
    }

    /// 检查端点形状是否适用于该目标
    ///
    /// 自定义函数自行处理任何形状。
    pub fn check(&self, value: &TweenValue) -> HostResult<()> {
        let expected = match self {
            StyleTarget::Custom(_) => return Ok(()),
            StyleTarget::Xy => "point",
            StyleTarget::X | StyleTarget::Y | StyleTarget::Property(_) => "scalar",
        };

        if value.shape() == expected {
            Ok(())
        } else {
            Err(HostError::StyleShape {
                style: self.name().to_string(),
                expected,
                actual: value.shape(),
            })
        }
    }

    /// 把当前帧写到元素上
    pub fn apply(&self, element: &dyn Element, ctx: &StepContext<'_>) {
        match (self, ctx.value()) {
            (StyleTarget::X, TweenValue::Scalar(v)) => element.set_translate_x(v),
            (StyleTarget::Y, TweenValue::Scalar(v)) => element.set_translate_y(v),
            (StyleTarget::Xy, TweenValue::Point(p)) => element.set_translate(p.x, p.y),
            (StyleTarget::Property(name), TweenValue::Scalar(v)) => {
                element.style(name, &format!("{v}{}", ctx.ext));
            }
            (StyleTarget::Custom(f), _) => f(element, ctx),
            // 形状已在启动前校验
            _ => {}
        }
    }
}

impl From<&str> for StyleTarget {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl fmt::Debug for StyleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleTarget::Custom(_) => f.write_str("Custom(..)"),
            other => write!(f, "{}", other.name()),
        }
    }
}
