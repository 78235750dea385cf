//! # Timer 模块
//!
//! 没有原生帧回调时的替代实现：用定时器模拟固定间隔的帧，以及基于
//! `Instant` 的单调时钟。
//!
//! 帧的到期时间为 `now + max(0, interval - (now - last_time))`，
//! `last_time` 属于调度器实例本身，多个调度器之间互不影响。

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::trace;
use tween_runtime::{Clock, FrameCallback, FrameHandle, FrameScheduler};

/// 默认帧间隔（毫秒）
pub const DEFAULT_FRAME_INTERVAL_MS: f64 = 16.0;

/// 基于 `Instant` 的单调时钟，从创建时刻开始计时
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// 创建时钟
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// 等待中的帧
struct PendingFrame {
    handle: FrameHandle,
    /// 到期时间（毫秒）
    due: f64,
    callback: FrameCallback,
}

/// 定时器帧调度器
///
/// 请求不会自己触发，需要宿主循环调用 `run_due` 或 `run_until_idle`。
pub struct TimerScheduler {
    clock: Rc<dyn Clock>,
    interval: f64,
    last_time: Cell<f64>,
    next_id: Cell<u64>,
    pending: RefCell<Vec<PendingFrame>>,
}

impl fmt::Debug for TimerScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerScheduler")
            .field("interval", &self.interval)
            .field("last_time", &self.last_time.get())
            .field("pending", &self.pending.borrow().len())
            .finish()
    }
}

impl TimerScheduler {
    /// 使用默认帧间隔创建调度器
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self::with_interval(clock, DEFAULT_FRAME_INTERVAL_MS)
    }

    /// 指定帧间隔（毫秒）
    pub fn with_interval(clock: Rc<dyn Clock>, interval_ms: f64) -> Self {
        Self {
            clock,
            interval: interval_ms.max(0.0),
            last_time: Cell::new(f64::NEG_INFINITY),
            next_id: Cell::new(0),
            pending: RefCell::new(Vec::new()),
        }
    }

    /// 帧间隔（毫秒）
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// 等待中的帧数量
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// 是否没有等待中的帧
    pub fn is_idle(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    /// 最早的到期时间
    pub fn next_due(&self) -> Option<f64> {
        self.pending
            .borrow()
            .iter()
            .map(|frame| frame.due)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// 执行所有已到期的帧
    ///
    /// 回调里新请求的帧不会在本次调用中执行。
    ///
    /// # 返回
    /// 执行的回调数量
    pub fn run_due(&self) -> usize {
        let now = self.clock.now_ms();
        let due: Vec<PendingFrame> = {
            let mut pending = self.pending.borrow_mut();
            let (due, rest): (Vec<_>, Vec<_>) =
                std::mem::take(&mut *pending).into_iter().partition(|f| f.due <= now);
            *pending = rest;
            due
        };

        let count = due.len();
        for frame in due {
            trace!(handle = frame.handle.value(), due = frame.due, "执行帧");
            (frame.callback)(frame.due);
        }
        count
    }

    /// 阻塞运行，直到没有等待中的帧
    ///
    /// 每次睡眠到最早的到期时间再执行。
    ///
    /// # 返回
    /// 执行的回调总数
    pub fn run_until_idle(&self) -> usize {
        let mut total = 0;
        while let Some(due) = self.next_due() {
            let wait = due - self.clock.now_ms();
            if wait > 0.0 {
                std::thread::sleep(Duration::from_secs_f64(wait / 1000.0));
            }
            total += self.run_due();
        }
        total
    }
}

impl FrameScheduler for TimerScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let now = self.clock.now_ms();
        let time_to_call = (self.interval - (now - self.last_time.get())).max(0.0);
        let due = now + time_to_call;
        self.last_time.set(due);

        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let handle = FrameHandle(id);

        self.pending.borrow_mut().push(PendingFrame {
            handle,
            due,
            callback,
        });
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.pending.borrow_mut().retain(|frame| frame.handle != handle);
    }
}
