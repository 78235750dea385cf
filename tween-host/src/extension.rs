//! # Extension 模块
//!
//! 把动画挂到宿主元素上：`animate` / `cancel_animation` / `set_delta`。
//!
//! 动画实例在第一次使用时创建，之后同一元素上的所有调用共享它，
//! 因此在同一元素上启动新动画会替换正在运行的那个。

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;
use tween_runtime::{
    AnimateOptions, Animation, Clock, Delta, DeltaSpec, EaseMode, FrameHandle, FrameScheduler,
    LoopState, StepContext,
};

use crate::config::TweenConfig;
use crate::element::Element;
use crate::error::HostResult;
use crate::style::StyleTarget;

/// 绑定了动画能力的元素
pub struct AnimatedElement<E: Element> {
    element: Rc<E>,
    scheduler: Rc<dyn FrameScheduler>,
    clock: Rc<dyn Clock>,
    config: TweenConfig,
    animation: OnceCell<Animation>,
}

impl<E: Element> fmt::Debug for AnimatedElement<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimatedElement")
            .field("animation", &self.animation.get())
            .finish_non_exhaustive()
    }
}

impl<E: Element> AnimatedElement<E> {
    /// 绑定元素，使用默认配置
    pub fn new(element: Rc<E>, scheduler: Rc<dyn FrameScheduler>, clock: Rc<dyn Clock>) -> Self {
        Self::with_config(element, scheduler, clock, TweenConfig::default())
    }

    /// 绑定元素，未设置的动画参数从 `config` 中取
    pub fn with_config(
        element: Rc<E>,
        scheduler: Rc<dyn FrameScheduler>,
        clock: Rc<dyn Clock>,
        config: TweenConfig,
    ) -> Self {
        Self {
            element,
            scheduler,
            clock,
            config,
            animation: OnceCell::new(),
        }
    }

    /// 被绑定的元素
    pub fn element(&self) -> &Rc<E> {
        &self.element
    }

    /// 当前配置
    pub fn config(&self) -> &TweenConfig {
        &self.config
    }

    /// 动画实例（第一次访问时创建）
    pub fn animation(&self) -> &Animation {
        self.animation
            .get_or_init(|| Animation::new(self.scheduler.clone(), self.clock.clone()))
    }

    /// 动画状态；从未启动过时为 `Idle`
    pub fn state(&self) -> LoopState {
        self.animation
            .get()
            .map(Animation::state)
            .unwrap_or_default()
    }

    /// 在元素上启动动画
    ///
    /// `options.step` 会被替换为按 `style` 写入元素的回调。
    pub fn animate(&self, style: impl Into<StyleTarget>, options: AnimateOptions) -> HostResult<()> {
        let style = style.into();
        let mut options = self.config.fill(options);

        let start = options.start_point.unwrap_or_default();
        let end = options.end_point.unwrap_or_default();
        start.check_shape(&end)?;
        style.check(&start)?;

        let element = self.element.clone();
        let log_frames = self.config.debug.log_frames;
        let target = style.clone();
        options.step = Some(Box::new(move |ctx: &StepContext<'_>| {
            if log_frames {
                debug!(style = ?target, delta = ctx.delta, "写入元素");
            }
            target.apply(element.as_ref(), ctx);
        }));

        debug!(style = ?style, start = ?start, end = ?end, "元素动画");
        self.animation().animate(options)?;
        Ok(())
    }

    /// 取消元素上的动画
    pub fn cancel_animation(&self, handle: Option<FrameHandle>) {
        self.animation().cancel_animation(handle);
    }

    /// 解析缓动描述并组合方向
    pub fn set_delta(
        &self,
        mode: EaseMode,
        first: Option<&DeltaSpec>,
        second: Option<&DeltaSpec>,
    ) -> Delta {
        self.animation().set_delta(mode, first, second)
    }
}
