//! # Marquee 模块
//!
//! 无限循环的横向平移：内容复制一份后，从 0% 线性平移到 -100%，周而复始。
//!
//! 总时长 = `duration-per-item` × 条目数（只有存在条目列表时才乘）。
//! 视口变化后通过去抖重新播放，保留当前进度。

use reveal_runtime::parse_float_prefix;
use tracing::debug;

use crate::page::MarqueeElement;

/// 每个条目的时长属性
pub const ATTR_DURATION_PER_ITEM: &str = "duration-per-item";

/// 跑马灯
#[derive(Debug, Clone, PartialEq)]
pub struct Marquee {
    /// 一个循环的时长（秒）
    duration: f32,
    /// 当前循环内的进度 (0.0 - 1.0)
    progress: f32,
    /// 已完成的循环次数
    cycles: u32,
    /// 重新播放次数
    replays: u32,
}

impl Marquee {
    /// 从页面元素创建
    ///
    /// # 返回
    /// 条目列表为空时返回 `None`（没有可以滚动的内容）
    pub fn from_element(element: &MarqueeElement, default_per_item: f32) -> Option<Self> {
        let per_item = element
            .attributes
            .get(ATTR_DURATION_PER_ITEM)
            .and_then(|raw| parse_float_prefix(raw))
            .filter(|v| *v > 0.0)
            .unwrap_or(default_per_item);

        let duration = match element.item_count {
            Some(0) => return None,
            Some(count) => per_item * count as f32,
            None => per_item,
        };
        if duration.is_nan() || duration <= 0.0 {
            return None;
        }

        debug!(duration, "跑马灯已初始化");
        Some(Self {
            duration,
            progress: 0.0,
            cycles: 0,
            replays: 0,
        })
    }

    /// 推进时间
    ///
    /// 一次推进多个循环时只累计循环次数，进度取余数。
    pub fn advance(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let total = self.progress + dt / self.duration;
        self.cycles = self.cycles.saturating_add(total.floor() as u32);
        self.progress = total.fract();
    }

    /// 重新播放，保留当前进度
    ///
    /// 循环从保留的进度处重新开始，此后的 [`Self::advance`] 照常推进；
    /// 视口尺寸变化后内容宽度会变，重新播放让平移按新宽度继续。
    pub fn replay(&mut self) {
        self.replays += 1;
        debug!(progress = self.progress, replays = self.replays, "跑马灯重新播放");
    }

    // ========== 查询方法 ==========

    /// 当前水平位移（百分比，0 到 -100）
    pub fn x_percent(&self) -> f32 {
        -100.0 * self.progress
    }

    /// 一个循环的时长（秒）
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// 当前进度
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// 已完成的循环次数
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// 重新播放次数
    pub fn replays(&self) -> u32 {
        self.replays
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn element(per_item: Option<&str>, item_count: Option<usize>) -> MarqueeElement {
        let mut attributes = BTreeMap::new();
        if let Some(raw) = per_item {
            attributes.insert(ATTR_DURATION_PER_ITEM.to_string(), raw.to_string());
        }
        MarqueeElement {
            attributes,
            item_count,
        }
    }

    #[test]
    fn test_duration_multiplies_by_item_count() {
        let marquee = Marquee::from_element(&element(Some("3"), Some(4)), 2.5).unwrap();
        assert_eq!(marquee.duration(), 12.0);
    }

    #[test]
    fn test_default_per_item() {
        let marquee = Marquee::from_element(&element(None, None), 2.5).unwrap();
        assert_eq!(marquee.duration(), 2.5);

        let marquee = Marquee::from_element(&element(Some("abc"), Some(2)), 2.5).unwrap();
        assert_eq!(marquee.duration(), 5.0);

        let marquee = Marquee::from_element(&element(Some("0"), None), 2.5).unwrap();
        assert_eq!(marquee.duration(), 2.5);
    }

    #[test]
    fn test_empty_item_list_disables() {
        assert!(Marquee::from_element(&element(Some("3"), Some(0)), 2.5).is_none());
    }

    #[test]
    fn test_loops_forever() {
        let mut marquee = Marquee::from_element(&element(Some("2"), None), 2.5).unwrap();
        marquee.advance(1.0);
        assert!((marquee.x_percent() + 50.0).abs() < 1e-4);

        marquee.advance(1.5);
        assert_eq!(marquee.cycles(), 1);
        assert!((marquee.progress() - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_replay_preserves_progress() {
        let mut marquee = Marquee::from_element(&element(Some("4"), None), 2.5).unwrap();
        marquee.advance(1.0);
        let before = marquee.progress();

        marquee.replay();
        assert_eq!(marquee.progress(), before);
        assert_eq!(marquee.replays(), 1);
    }

    /// 重新播放后从保留的进度继续循环，而不是回到起点
    #[test]
    fn test_replay_continues_loop_from_progress() {
        let mut marquee = Marquee::from_element(&element(Some("4"), None), 2.5).unwrap();
        marquee.advance(3.0);
        marquee.replay();

        marquee.advance(2.0);
        assert_eq!(marquee.cycles(), 1);
        assert!((marquee.progress() - 0.25).abs() < 1e-4);
        assert!((marquee.x_percent() + 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_long_jump_saturates_cycles() {
        let mut marquee = Marquee::from_element(&element(Some("1"), None), 2.5).unwrap();
        marquee.advance(1e10);
        marquee.advance(1e10);
        assert_eq!(marquee.cycles(), u32::MAX);
        assert!((0.0..1.0).contains(&marquee.progress()));
    }
}
