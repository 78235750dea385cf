//! # Element 模块
//!
//! 宿主元素接口：动画最终通过它平移元素或写入样式。
//!
//! ## 设计说明
//!
//! 所有方法都接收 `&self`，实现方使用内部可变性（`RefCell` / `Cell`）。
//! 这样动画的帧回调只需持有 `Rc<E>`，回调之间不会产生借用冲突。

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// 可被动画驱动的宿主元素
///
/// ## 实现示例
///
/// ```rust,ignore
/// struct Sprite {
///     offset: Cell<(f64, f64)>,
///     opacity: Cell<f64>,
/// }
///
/// impl Element for Sprite {
///     fn set_translate_x(&self, x: f64) {
///         let (_, y) = self.offset.get();
///         self.offset.set((x, y));
///     }
///     fn set_translate_y(&self, y: f64) {
///         let (x, _) = self.offset.get();
///         self.offset.set((x, y));
///     }
///     fn set_translate(&self, x: f64, y: f64) {
///         self.offset.set((x, y));
///     }
///     fn style(&self, name: &str, value: &str) {
///         if name == "opacity" {
///             self.opacity.set(value.parse().unwrap_or(1.0));
///         }
///     }
/// }
/// ```
pub trait Element: 'static {
    /// 设置水平平移
    fn set_translate_x(&self, x: f64);

    /// 设置垂直平移
    fn set_translate_y(&self, y: f64);

    /// 同时设置两个方向的平移
    fn set_translate(&self, x: f64, y: f64);

    /// 写入样式属性
    ///
    /// # 参数
    /// - `name`: 属性名称（如 `"opacity"`、`"width"`）
    /// - `value`: 已拼接单位后缀的值（如 `"120px"`）
    fn style(&self, name: &str, value: &str);
}

/// 元素上发生的一次调用
#[derive(Debug, Clone, PartialEq)]
pub enum ElementCall {
    TranslateX(f64),
    TranslateY(f64),
    Translate(f64, f64),
    Style { name: String, value: String },
}

impl fmt::Display for ElementCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementCall::TranslateX(x) => write!(f, "translateX({x})"),
            ElementCall::TranslateY(y) => write!(f, "translateY({y})"),
            ElementCall::Translate(x, y) => write!(f, "translate({x}, {y})"),
            ElementCall::Style { name, value } => write!(f, "{name}: {value}"),
        }
    }
}

/// 记录所有调用的元素
///
/// 用于 headless 模式和测试。克隆得到的实例共享同一份记录。
#[derive(Debug, Clone, Default)]
pub struct RecordingElement {
    calls: Rc<RefCell<Vec<ElementCall>>>,
}

impl RecordingElement {
    /// 创建空记录的元素
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有调用（按发生顺序）
    pub fn calls(&self) -> Vec<ElementCall> {
        self.calls.borrow().clone()
    }

    /// 最后一次调用
    pub fn last_call(&self) -> Option<ElementCall> {
        self.calls.borrow().last().cloned()
    }

    /// 调用次数
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// 清空记录
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn push(&self, call: ElementCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Element for RecordingElement {
    fn set_translate_x(&self, x: f64) {
        self.push(ElementCall::TranslateX(x));
    }

    fn set_translate_y(&self, y: f64) {
        self.push(ElementCall::TranslateY(y));
    }

    fn set_translate(&self, x: f64, y: f64) {
        self.push(ElementCall::Translate(x, y));
    }

    fn style(&self, name: &str, value: &str) {
        self.push(ElementCall::Style {
            name: name.to_string(),
            value: value.to_string(),
        });
    }
}
