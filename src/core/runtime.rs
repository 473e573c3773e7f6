//! 帧调度
//!
//! 窗口模式由 winit 的重绘请求驱动帧；无窗口模式使用 [`FixedRateScheduler`]
//! 以固定节拍产生帧，直到达到帧数上限或收到取消信号。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 可在线程间共享的取消标记
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求停止
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// 一帧的时间信息
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// 帧序号（从 0 开始）
    pub index: u64,
    /// 距调度开始的时间
    pub elapsed: Duration,
    /// 距上一帧的时间
    pub delta: Duration,
}

/// 帧调度器
///
/// 每次调用返回下一帧，返回 `None` 表示循环应当结束。
pub trait FrameScheduler {
    fn next_frame(&mut self) -> Option<FrameTick>;
}

/// 固定帧率调度器
pub struct FixedRateScheduler {
    interval: Option<Duration>,
    max_frames: Option<u64>,
    cancel: CancelToken,
    frame: u64,
    start: Instant,
    last: Instant,
}

impl FixedRateScheduler {
    /// 按 `target_fps` 节拍调度
    pub fn new(target_fps: u32, max_frames: Option<u64>, cancel: CancelToken) -> Self {
        let interval = (target_fps > 0).then(|| Duration::from_secs_f64(1.0 / target_fps as f64));
        let now = Instant::now();
        Self {
            interval,
            max_frames,
            cancel,
            frame: 0,
            start: now,
            last: now,
        }
    }

    /// 不等待，帧与帧之间连续执行（测试和批量模拟）
    pub fn unthrottled(max_frames: Option<u64>, cancel: CancelToken) -> Self {
        let mut scheduler = Self::new(0, max_frames, cancel);
        scheduler.interval = None;
        scheduler
    }

    /// 已产生的帧数
    pub fn frames_issued(&self) -> u64 {
        self.frame
    }
}

impl FrameScheduler for FixedRateScheduler {
    fn next_frame(&mut self) -> Option<FrameTick> {
        if self.cancel.is_cancelled() {
            return None;
        }
        if self.max_frames.is_some_and(|max| self.frame >= max) {
            return None;
        }

        if let Some(interval) = self.interval {
            if self.frame > 0 {
                let deadline = self.last + interval;
                let now = Instant::now();
                if deadline > now {
                    std::thread::sleep(deadline - now);
                }
            }
        }

        let now = Instant::now();
        let tick = FrameTick {
            index: self.frame,
            elapsed: now.duration_since(self.start),
            delta: now.duration_since(self.last),
        };
        self.last = now;
        self.frame += 1;
        Some(tick)
    }
}

/// 每秒帧数统计
pub struct FpsCounter {
    last_report: Instant,
    frame_count: u32,
    last_fps: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            last_report: Instant::now(),
            frame_count: 0,
            last_fps: 0,
        }
    }

    /// 记录一帧；每满一秒返回新的 FPS 值
    pub fn update(&mut self) -> Option<u32> {
        self.frame_count += 1;
        let now = Instant::now();

        if now.duration_since(self.last_report) >= Duration::from_secs(1) {
            self.last_fps = self.frame_count;
            self.frame_count = 0;
            self.last_report = now;
            return Some(self.last_fps);
        }

        None
    }

    pub fn fps(&self) -> u32 {
        self.last_fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduler_stops_at_max_frames() {
        let mut scheduler = FixedRateScheduler::unthrottled(Some(3), CancelToken::new());
        let indices: Vec<u64> = std::iter::from_fn(|| scheduler.next_frame()).map(|t| t.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(scheduler.frames_issued(), 3);
    }

    #[test]
    fn test_scheduler_stops_on_cancel() {
        let cancel = CancelToken::new();
        let mut scheduler = FixedRateScheduler::unthrottled(None, cancel.clone());
        assert!(scheduler.next_frame().is_some());
        cancel.cancel();
        assert!(scheduler.next_frame().is_none());
    }

    #[test]
    fn test_zero_max_frames_yields_nothing() {
        let mut scheduler = FixedRateScheduler::new(60, Some(0), CancelToken::new());
        assert!(scheduler.next_frame().is_none());
    }

    #[test]
    fn test_fixed_rate_spaces_frames() {
        let mut scheduler = FixedRateScheduler::new(200, Some(3), CancelToken::new());
        let first = scheduler.next_frame().unwrap();
        scheduler.next_frame();
        let third = scheduler.next_frame().unwrap();
        assert!(third.elapsed - first.elapsed >= Duration::from_millis(9));
    }

    #[test]
    fn test_fps_counter_starts_at_zero() {
        let mut counter = FpsCounter::new();
        assert_eq!(counter.fps(), 0);
        assert_eq!(counter.update(), None);
    }
}
