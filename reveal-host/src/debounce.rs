//! # Debounce 模块
//!
//! 合并短时间内的连续通知：最后一次通知之后经过 `delay` 才触发一次。

/// 去抖器
///
/// 时间由调用者传入，本身不持有时钟。
#[derive(Debug, Clone, PartialEq)]
pub struct Debouncer {
    /// 去抖延迟（秒）
    delay: f64,
    /// 截止时间；`None` 表示没有待处理的通知
    deadline: Option<f64>,
}

impl Debouncer {
    /// 创建去抖器，负延迟视为 0
    pub fn new(delay: f64) -> Self {
        Self {
            delay: delay.max(0.0),
            deadline: None,
        }
    }

    /// 从毫秒创建
    pub fn from_millis(delay_ms: u64) -> Self {
        Self::new(delay_ms as f64 / 1000.0)
    }

    /// 记录一次通知，重新计时
    pub fn notify(&mut self, now: f64) {
        self.deadline = Some(now + self.delay);
    }

    /// 检查是否到期
    ///
    /// # 返回
    /// 到期时返回 `true` 并清除待处理状态，每次通知序列只返回一次 `true`。
    pub fn poll(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// 是否有待处理的通知
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// 去抖延迟（秒）
    pub fn delay(&self) -> f64 {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coalesces_bursts() {
        let mut debouncer = Debouncer::from_millis(200);
        debouncer.notify(0.0);
        debouncer.notify(0.1);
        debouncer.notify(0.15);

        assert!(!debouncer.poll(0.3));
        assert!(debouncer.is_pending());
        assert!(debouncer.poll(0.36));
        assert!(!debouncer.poll(0.4));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_zero_delay_fires_on_next_poll() {
        let mut debouncer = Debouncer::new(0.0);
        assert!(!debouncer.poll(0.0));

        debouncer.notify(1.0);
        assert!(debouncer.poll(1.0));
    }

    #[test]
    fn test_negative_delay_clamped() {
        assert_eq!(Debouncer::new(-1.0).delay(), 0.0);
    }
}
