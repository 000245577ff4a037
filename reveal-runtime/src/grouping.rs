//! # Grouping 模块
//!
//! 错峰分组：在 [`GROUPING_WINDOW_SECS`] 内相继触发的元素组成一组，
//! 组内延迟按 `0, step, 2·step, …` 线性递增；间隔超过窗口则开始新的一组。

/// 分组时间窗口（秒）
pub const GROUPING_WINDOW_SECS: f64 = 0.1;

/// 错峰分组状态
///
/// 由调度器独占，只在 [`GroupingState::next_delay`] 中修改。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupingState {
    /// 上一次参与分组的触发时间（秒）
    last_fire: f64,
    /// 当前组内序号
    group_index: u32,
}

impl Default for GroupingState {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupingState {
    /// 创建初始状态，保证第一次触发总是开始新的一组
    pub fn new() -> Self {
        Self {
            last_fire: f64::NEG_INFINITY,
            group_index: 0,
        }
    }

    /// 计算本次触发的组内延迟并推进状态
    ///
    /// # 参数
    /// - `now`: 触发时间（秒）
    /// - `step`: 该元素的组内步长（秒）
    ///
    /// # 返回
    /// - 组内延迟（秒）
    pub fn next_delay(&mut self, now: f64, step: f32) -> f32 {
        if now - self.last_fire > GROUPING_WINDOW_SECS {
            self.group_index = 0;
        }
        let delay = self.group_index as f32 * step;
        self.group_index += 1;
        self.last_fire = now;
        delay
    }

    /// 上一次参与分组的触发时间
    pub fn last_fire(&self) -> f64 {
        self.last_fire
    }

    /// 下一个加入当前组的元素将获得的序号
    pub fn group_index(&self) -> u32 {
        self.group_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delays(times: &[f64], step: f32) -> Vec<f32> {
        let mut state = GroupingState::new();
        times.iter().map(|&t| state.next_delay(t, step)).collect()
    }

    #[test]
    fn test_first_fire_starts_group() {
        let mut state = GroupingState::new();
        assert_eq!(state.next_delay(0.0, 0.1), 0.0);
        assert_eq!(state.group_index(), 1);
        assert_eq!(state.last_fire(), 0.0);
    }

    #[test]
    fn test_group_reset_law() {
        let result = delays(&[0.00, 0.03, 0.08, 0.25, 0.27], 0.1);
        let expected = [0.0, 0.1, 0.2, 0.0, 0.1];
        assert_eq!(result.len(), expected.len());
        for (got, want) in result.iter().zip(expected) {
            assert!((got - want).abs() < 1e-6, "got {got}, want {want}");
        }
    }

    #[test]
    fn test_gap_equal_to_window_joins_group() {
        // 只有严格大于窗口才重置
        let mut state = GroupingState::new();
        state.next_delay(0.0, 0.1);
        let delay = state.next_delay(GROUPING_WINDOW_SECS, 0.1);
        assert!(delay > 0.0);
    }

    #[test]
    fn test_chained_fires_extend_group() {
        // 窗口从上一次触发起算，持续的快速触发会让组不断延长
        let result = delays(&[0.0, 0.09, 0.18, 0.27], 0.15);
        let expected = [0.0, 0.15, 0.3, 0.45];
        for (got, want) in result.iter().zip(expected) {
            assert!((got - want).abs() < 1e-5);
        }
    }

    #[test]
    fn test_step_is_per_element() {
        let mut state = GroupingState::new();
        assert_eq!(state.next_delay(0.0, 0.1), 0.0);
        assert!((state.next_delay(0.01, 0.25) - 0.25).abs() < 1e-6);
        assert!((state.next_delay(0.02, 0.1) - 0.2).abs() < 1e-6);
    }
}
