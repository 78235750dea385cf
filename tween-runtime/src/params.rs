//! # Params 模块
//!
//! 动画参数：循环直接使用的 `AnimationParams`，以及 `animate` 的可选项 `AnimateOptions`。

use std::fmt;

use crate::ease::Delta;
use crate::value::{TweenValue, get_value};

/// 每帧回调（`set_ani` 层），参数为缓动后的进度
pub type DeltaStepFn = Box<dyn FnMut(f64)>;

/// 每帧回调（`animate` 层）
pub type StepFn = Box<dyn FnMut(&StepContext<'_>)>;

/// 每帧副作用 / 完成回调，参数为当前帧的完整参数视图
pub type FrameHook = Box<dyn FnMut(&TweenFrame<'_>)>;

/// 动画循环参数
pub struct AnimationParams {
    /// 每帧回调
    pub step: DeltaStepFn,
    /// 起点
    pub start_point: TweenValue,
    /// 终点
    pub end_point: TweenValue,
    /// 延迟（秒）
    pub delay: f64,
    /// 时长（毫秒）
    pub duration: f64,
    /// 进度变换
    pub delta: Delta,
    /// 单位后缀
    pub ext: String,
}

impl AnimationParams {
    /// 生成当前帧的参数视图
    pub fn frame(&self, progress: f64, eased: f64) -> TweenFrame<'_> {
        TweenFrame {
            start_point: self.start_point,
            end_point: self.end_point,
            ext: &self.ext,
            delay: self.delay,
            duration: self.duration,
            progress,
            eased,
        }
    }
}

impl fmt::Debug for AnimationParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationParams")
            .field("start_point", &self.start_point)
            .field("end_point", &self.end_point)
            .field("delay", &self.delay)
            .field("duration", &self.duration)
            .field("ext", &self.ext)
            .finish_non_exhaustive()
    }
}

/// 传给 `action` / `callback` 的参数视图
#[derive(Debug, Clone, PartialEq)]
pub struct TweenFrame<'a> {
    pub start_point: TweenValue,
    pub end_point: TweenValue,
    pub ext: &'a str,
    /// 延迟（秒）
    pub delay: f64,
    /// 时长（毫秒）
    pub duration: f64,
    /// 线性进度 (0.0 - 1.0)；跳过的动画为 0
    pub progress: f64,
    /// 缓动后的进度
    pub eased: f64,
}

/// `animate` 传给调用方 step 的上下文
#[derive(Debug, Clone, PartialEq)]
pub struct StepContext<'a> {
    pub start_point: TweenValue,
    pub end_point: TweenValue,
    /// 缓动后的进度
    pub delta: f64,
    pub ext: &'a str,
}

impl StepContext<'_> {
    /// 用当前进度在任意两个数之间插值
    #[inline]
    pub fn get_value(&self, start: f64, end: f64) -> f64 {
        get_value(start, end, self.delta)
    }

    /// 起点与终点之间的当前值
    pub fn value(&self) -> TweenValue {
        match (self.start_point, self.end_point) {
            (TweenValue::Scalar(a), TweenValue::Scalar(b)) => TweenValue::Scalar(self.get_value(a, b)),
            (TweenValue::Point(a), TweenValue::Point(b)) => TweenValue::Point(a.lerp(b, self.delta)),
            // animate 已校验形状
            (start, _) => start,
        }
    }
}

/// `animate` 的参数，未设置的字段使用默认值
///
/// | 字段 | 默认值 |
/// |---|---|
/// | `start_point` / `end_point` | `0` |
/// | `delay` | `0` 秒 |
/// | `duration` | `1` 秒 |
/// | `delta` | easeOut(linear) |
/// | `ext` | `""` |
/// | `condition` | `true` |
/// | `step` / `action` / `callback` | 无 |
#[derive(Default)]
pub struct AnimateOptions {
    pub step: Option<StepFn>,
    pub start_point: Option<TweenValue>,
    pub end_point: Option<TweenValue>,
    /// 延迟（秒）
    pub delay: Option<f64>,
    /// 时长（秒）
    pub duration: Option<f64>,
    pub delta: Option<Delta>,
    pub ext: Option<String>,
    pub callback: Option<FrameHook>,
    pub action: Option<FrameHook>,
    pub condition: Option<bool>,
}

impl AnimateOptions {
    /// 创建空参数
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置每帧回调
    pub fn with_step(mut self, step: impl FnMut(&StepContext<'_>) + 'static) -> Self {
        self.step = Some(Box::new(step));
        self
    }

    /// 设置起点
    pub fn with_start(mut self, start: impl Into<TweenValue>) -> Self {
        self.start_point = Some(start.into());
        self
    }

    /// 设置终点
    pub fn with_end(mut self, end: impl Into<TweenValue>) -> Self {
        self.end_point = Some(end.into());
        self
    }

    /// 设置延迟（秒）
    pub fn with_delay(mut self, seconds: f64) -> Self {
        self.delay = Some(seconds);
        self
    }

    /// 设置时长（秒）
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// 设置进度变换
    pub fn with_delta(mut self, delta: Delta) -> Self {
        self.delta = Some(delta);
        self
    }

    /// 设置单位后缀
    pub fn with_ext(mut self, ext: impl Into<String>) -> Self {
        self.ext = Some(ext.into());
        self
    }

    /// 设置完成回调
    pub fn with_callback(mut self, callback: impl FnMut(&TweenFrame<'_>) + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// 设置每帧副作用
    pub fn with_action(mut self, action: impl FnMut(&TweenFrame<'_>) + 'static) -> Self {
        self.action = Some(Box::new(action));
        self
    }

    /// 设置执行条件，为 `false` 时直接完成
    pub fn with_condition(mut self, condition: bool) -> Self {
        self.condition = Some(condition);
        self
    }
}

impl fmt::Debug for AnimateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimateOptions")
            .field("start_point", &self.start_point)
            .field("end_point", &self.end_point)
            .field("delay", &self.delay)
            .field("duration", &self.duration)
            .field("ext", &self.ext)
            .field("condition", &self.condition)
            .field("has_step", &self.step.is_some())
            .field("has_callback", &self.callback.is_some())
            .field("has_action", &self.action.is_some())
            .finish()
    }
}
