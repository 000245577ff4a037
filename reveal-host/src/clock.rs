//! # Clock 模块
//!
//! 宿主时钟实现。
//!
//! [`ManualClock`] 由宿主推进：回放时逐帧前进，空闲时直接跳到下一步骤。

use reveal_runtime::Clock;

/// 手动推进的时钟
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    /// 向前推进 `dt` 秒，负数被忽略
    pub fn advance(&mut self, dt: f64) {
        if dt > 0.0 {
            self.now += dt;
        }
    }

    /// 跳到指定时间，不允许倒退
    pub fn set(&mut self, now: f64) {
        if now > self.now {
            self.now = now;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_monotonic() {
        let mut clock = ManualClock::default();
        clock.advance(0.5);
        clock.advance(-1.0);
        assert_eq!(clock.now(), 0.5);

        clock.set(0.2);
        assert_eq!(clock.now(), 0.5);
        clock.set(2.0);
        assert_eq!(clock.now(), 2.0);
    }
}
