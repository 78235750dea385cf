//! # Scheduler 模块
//!
//! 帧调度与时钟的抽象接口。
//!
//! 动画循环只依赖两个原语：
//! - `FrameScheduler`：请求下一帧回调 / 撤销已请求的帧
//! - `Clock`：单调递增的毫秒时钟
//!
//! 宿主层提供真实实现（定时器模拟、系统时钟）；本模块提供可手动推进的
//! `ManualScheduler` 与 `ManualClock`，用于测试和离线采样。

use std::cell::{Cell, RefCell};
use std::fmt;

/// 帧回调，参数为帧时间戳（毫秒）
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// 帧请求句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

impl FrameHandle {
    /// 获取内部 ID 值
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for FrameHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameHandle({})", self.0)
    }
}

/// 帧调度器接口
///
/// 单线程、协作式：回调在调度器自己的驱动循环里被调用。
pub trait FrameScheduler {
    /// 请求在下一帧调用 `callback`
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// 撤销尚未执行的帧请求；句柄已执行或不存在时什么也不做
    fn cancel_frame(&self, handle: FrameHandle);
}

/// 单调时钟接口
pub trait Clock {
    /// 当前时间（毫秒）
    fn now_ms(&self) -> f64;
}

/// 可手动设置的时钟
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    /// 创建时钟，初始时间为 `start_ms`
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    /// 设置当前时间
    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    /// 向前推进时间
    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// 手动推进的帧调度器
///
/// 帧请求被放入队列，直到调用方执行 `run_frame`。
/// 回调中新请求的帧进入下一帧，不会在当前帧被执行。
#[derive(Default)]
pub struct ManualScheduler {
    next_id: Cell<u64>,
    pending: RefCell<Vec<(FrameHandle, FrameCallback)>>,
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("pending", &self.pending_count())
            .finish()
    }
}

impl ManualScheduler {
    /// 创建调度器
    pub fn new() -> Self {
        Self::default()
    }

    /// 等待中的帧请求数量
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// 是否没有等待中的帧
    pub fn is_idle(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    /// 执行当前所有等待中的帧
    ///
    /// # 返回
    /// 本帧执行的回调数量
    pub fn run_frame(&self, timestamp: f64) -> usize {
        let frame = std::mem::take(&mut *self.pending.borrow_mut());
        let count = frame.len();
        for (_, callback) in frame {
            callback(timestamp);
        }
        count
    }

    /// 每帧把时钟推进 `frame_ms`，直到队列为空或达到 `max_frames`
    ///
    /// # 返回
    /// 实际执行的帧数
    pub fn run_until_idle(&self, clock: &ManualClock, frame_ms: f64, max_frames: usize) -> usize {
        let mut frames = 0;
        while !self.is_idle() && frames < max_frames {
            clock.advance(frame_ms);
            self.run_frame(clock.now_ms());
            frames += 1;
        }
        frames
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let handle = FrameHandle(id);
        self.pending.borrow_mut().push((handle, callback));
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.pending.borrow_mut().retain(|(h, _)| *h != handle);
    }
}
