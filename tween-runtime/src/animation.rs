//! # Animation 模块
//!
//! 帧驱动的补间动画。
//!
//! 状态机：`Idle → Scheduled →（逐帧）Scheduled → Completed | Cancelled`。
//!
//! - 每个 `Animation` 同一时刻最多只有一个未执行的帧请求，每帧重新请求都会替换旧句柄
//! - 自然完成时恰好调用一次 `callback`；取消时不调用
//! - 所有回调执行期间不持有实例状态的借用，回调里可以取消或重新启动同一个动画

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::delta::{DeltaSpec, get_delta, set_delta};
use crate::ease::{Delta, EaseMode, set_ease};
use crate::easing::EasingKind;
use crate::error::{AnimationError, TweenResult};
use crate::params::{AnimateOptions, AnimationParams, FrameHook, StepContext};
use crate::scheduler::{Clock, FrameHandle, FrameScheduler};

/// `animate` 的默认时长（秒）
pub const DEFAULT_DURATION_SECS: f64 = 1.0;

/// 动画循环状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// 尚未启动
    #[default]
    Idle,
    /// 有帧请求在等待
    Scheduled,
    /// 自然完成（包括被条件或相同端点跳过）
    Completed,
    /// 被取消
    Cancelled,
}

impl LoopState {
    /// 是否为活跃状态
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Scheduled)
    }

    /// 是否已结束
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// 实例共享状态
struct Shared {
    scheduler: Rc<dyn FrameScheduler>,
    clock: Rc<dyn Clock>,
    handle: Cell<Option<FrameHandle>>,
    /// 正在执行的帧请求及其所属循环，帧执行完后清空
    delivered: Cell<Option<(FrameHandle, u64)>>,
    state: Cell<LoopState>,
    /// 每次 `set_ani` 加一，旧循环的帧据此失效
    generation: Cell<u64>,
}

impl Shared {
    fn is_current(&self, generation: u64) -> bool {
        self.generation.get() == generation && self.state.get() == LoopState::Scheduled
    }

    /// 当前循环中正在执行的帧请求
    fn delivered_handle(&self) -> Option<FrameHandle> {
        self.delivered
            .get()
            .filter(|&(_, generation)| generation == self.generation.get())
            .map(|(handle, _)| handle)
    }

    fn revoke(&self) {
        if let Some(handle) = self.handle.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        self.revoke();
    }
}

/// 单次循环的数据
struct Run {
    generation: u64,
    params: AnimationParams,
    action: Option<FrameHook>,
    callback: Option<FrameHook>,
    /// 起始时间（毫秒）
    start: f64,
    /// 上一次推进进度的时间（毫秒）
    delay_marker: f64,
}

/// 补间动画
///
/// 克隆得到的是同一个实例的另一个引用，可以放进回调里用于取消。
#[derive(Clone)]
pub struct Animation {
    shared: Rc<Shared>,
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("state", &self.shared.state.get())
            .field("handle", &self.shared.handle.get())
            .finish()
    }
}

impl Animation {
    /// 创建动画实例
    pub fn new(scheduler: Rc<dyn FrameScheduler>, clock: Rc<dyn Clock>) -> Self {
        Self {
            shared: Rc::new(Shared {
                scheduler,
                clock,
                handle: Cell::new(None),
                delivered: Cell::new(None),
                state: Cell::new(LoopState::Idle),
                generation: Cell::new(0),
            }),
        }
    }

    /// 当前状态
    pub fn state(&self) -> LoopState {
        self.shared.state.get()
    }

    /// 当前未执行的帧请求
    pub fn current_handle(&self) -> Option<FrameHandle> {
        self.shared.handle.get()
    }

    /// 是否正在运行
    pub fn is_running(&self) -> bool {
        self.state().is_active()
    }

    // ========== 缓动 ==========

    /// 按名称获取缓动函数，未知名称回退到 linear
    pub fn get_delta(&self, name: &str, x: f64) -> Delta {
        get_delta(name, x)
    }

    /// 组合缓动方向
    pub fn set_ease(&self, mode: EaseMode, delta: Delta, second: Option<Delta>) -> Delta {
        set_ease(mode, delta, second)
    }

    /// 解析缓动描述并组合方向
    pub fn set_delta(
        &self,
        mode: EaseMode,
        first: Option<&DeltaSpec>,
        second: Option<&DeltaSpec>,
    ) -> Delta {
        set_delta(mode, first, second)
    }

    // ========== 动画控制 ==========

    /// 启动动画循环
    ///
    /// `condition` 为 `false` 或起点等于终点时不请求任何帧，立即调用 `callback`。
    /// 否则第一帧在本函数内同步执行，之后的帧由调度器驱动。
    ///
    /// 同一实例上已有的循环会先被撤销（不调用其 `callback`）。
    pub fn set_ani(
        &self,
        params: AnimationParams,
        action: Option<FrameHook>,
        callback: Option<FrameHook>,
        condition: bool,
    ) {
        let shared = &self.shared;
        shared.revoke();
        let generation = shared.generation.get() + 1;
        shared.generation.set(generation);

        if !condition || params.start_point == params.end_point {
            debug!(
                condition = condition,
                start = ?params.start_point,
                end = ?params.end_point,
                "跳过动画"
            );
            shared.state.set(LoopState::Completed);
            if let Some(mut callback) = callback {
                callback(&params.frame(0.0, 0.0));
            }
            return;
        }

        let now = shared.clock.now_ms();
        debug!(
            duration = params.duration,
            delay = params.delay,
            generation = generation,
            "开始动画"
        );

        let run = Rc::new(RefCell::new(Run {
            generation,
            params,
            action,
            callback,
            start: now,
            delay_marker: now,
        }));

        shared.state.set(LoopState::Scheduled);
        tick(shared, &run);
    }

    /// 填充默认值后启动动画
    ///
    /// 调用方的 step 会收到 `StepContext`（插值函数、起点、终点、进度、单位）。
    pub fn animate(&self, options: AnimateOptions) -> TweenResult<()> {
        let AnimateOptions {
            step,
            start_point,
            end_point,
            delay,
            duration,
            delta,
            ext,
            callback,
            action,
            condition,
        } = options;

        let start_point = start_point.unwrap_or_default();
        let end_point = end_point.unwrap_or_default();
        start_point.check_shape(&end_point)?;

        let delay = delay.unwrap_or(0.0);
        if !delay.is_finite() || delay < 0.0 {
            return Err(AnimationError::InvalidDelay { seconds: delay });
        }

        let duration = resolve_duration(duration)?;
        let delta = delta.unwrap_or_else(|| {
            set_delta(
                EaseMode::EaseOut,
                Some(&DeltaSpec::named(EasingKind::Linear.name())),
                None,
            )
        });
        let ext = ext.unwrap_or_default();

        let params = match step {
            Some(mut step) => {
                let step_ext = ext.clone();
                AnimationParams {
                    step: Box::new(move |delta: f64| {
                        step(&StepContext {
                            start_point,
                            end_point,
                            delta,
                            ext: &step_ext,
                        })
                    }),
                    start_point,
                    end_point,
                    delay,
                    duration,
                    delta,
                    ext,
                }
            }
            None => AnimationParams {
                step: Box::new(|_: f64| {}),
                start_point,
                end_point,
                delay,
                duration,
                delta,
                ext,
            },
        };

        self.set_ani(params, action, callback, condition.unwrap_or(true));
        Ok(())
    }

    /// 取消动画
    ///
    /// - `None`：撤销当前帧请求
    /// - `Some(handle)`：撤销指定的帧请求；若它是当前请求，或是正在执行的这一帧，
    ///   动画进入 `Cancelled`
    ///
    /// 在 step / action 内调用时，当前帧执行完后不再有后续帧，也不会调用 `callback`。
    pub fn cancel_animation(&self, handle: Option<FrameHandle>) {
        let shared = &self.shared;
        let current = shared.handle.get();
        let delivered = shared.delivered_handle();

        match handle {
            Some(handle) if current != Some(handle) && delivered != Some(handle) => {
                shared.scheduler.cancel_frame(handle);
                return;
            }
            _ => shared.revoke(),
        }

        if shared.state.get() == LoopState::Scheduled {
            shared.state.set(LoopState::Cancelled);
            debug!(generation = shared.generation.get(), "取消动画");
        }
    }
}

/// 将秒转换为毫秒
///
/// 未设置、为 0 或 NaN 时使用默认时长；负数或无穷大视为错误。
fn resolve_duration(seconds: Option<f64>) -> TweenResult<f64> {
    match seconds {
        None => Ok(DEFAULT_DURATION_SECS * 1000.0),
        Some(s) if s.is_nan() || s == 0.0 => Ok(DEFAULT_DURATION_SECS * 1000.0),
        Some(s) if s < 0.0 || s.is_infinite() => Err(AnimationError::InvalidDuration { seconds: s }),
        Some(s) => Ok(s * 1000.0),
    }
}

/// 执行一帧
fn tick(shared: &Rc<Shared>, run: &Rc<RefCell<Run>>) {
    let generation = run.borrow().generation;
    if !shared.is_current(generation) {
        return;
    }
    // 送达本帧的请求已经执行
    let delivered = shared.handle.take();
    shared.delivered.set(delivered.map(|handle| (handle, generation)));

    let now = shared.clock.now_ms();
    let waiting = {
        let run = run.borrow();
        now - run.delay_marker < run.params.delay * 1000.0
    };

    if !waiting {
        let (progress, eased) = {
            let mut guard = run.borrow_mut();
            let Run { params, start, .. } = &mut *guard;
            let progress = if params.duration > 0.0 {
                ((now - *start) / params.duration).clamp(0.0, 1.0)
            } else {
                1.0
            };
            let eased = params.delta.apply(progress);
            trace!(progress = progress, eased = eased, "动画帧");
            (params.step)(eased);
            (progress, eased)
        };

        // step 内可能取消或重启了动画
        if !shared.is_current(generation) {
            return;
        }

        {
            let mut run = run.borrow_mut();
            let Run { params, action, .. } = &mut *run;
            if let Some(action) = action.as_mut() {
                action(&params.frame(progress, eased));
            }
        }

        if !shared.is_current(generation) {
            return;
        }

        if progress >= 1.0 {
            // 先进入 Completed，callback 里可以在同一实例上启动下一段动画
            shared.state.set(LoopState::Completed);
            debug!(generation = generation, "动画完成");
            let mut run = run.borrow_mut();
            let Run {
                params, callback, ..
            } = &mut *run;
            if let Some(callback) = callback.as_mut() {
                callback(&params.frame(progress, eased));
            }
            return;
        }

        run.borrow_mut().delay_marker = now;
    }

    schedule_next(shared, run);
}

/// 请求下一帧
fn schedule_next(shared: &Rc<Shared>, run: &Rc<RefCell<Run>>) {
    shared.revoke();

    let weak: Weak<Shared> = Rc::downgrade(shared);
    let run = run.clone();
    let handle = shared.scheduler.request_frame(Box::new(move |_timestamp: f64| {
        if let Some(shared) = weak.upgrade() {
            tick(&shared, &run);
            shared.delivered.set(None);
        }
    }));
    shared.handle.set(Some(handle));
}
