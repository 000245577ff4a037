//! # Observer 模块
//!
//! 模拟的滚动观察器，实现 [`VisibilityTrigger`]。
//!
//! 元素顶边（相对视口）不高于 `threshold_fraction × 视口高度` 时视为越过阈值。
//! 每个注册只触发一次，触发后即移除。

use std::collections::HashMap;

use reveal_runtime::{ScrollDirection, TargetId, TriggerSpec, VisibilityTrigger};
use tracing::warn;

/// 单个注册
#[derive(Debug, Clone, Copy, PartialEq)]
struct Registration {
    target: TargetId,
    spec: TriggerSpec,
}

/// 滚动观察器
#[derive(Debug, Clone, Default)]
pub struct ScrollObserver {
    /// 元素在文档中的顶边位置
    doc_tops: HashMap<TargetId, f32>,
    /// 按注册顺序排列的待触发注册
    registrations: Vec<Registration>,
    /// 上一次同步时的滚动位置
    last_scroll: Option<f32>,
}

impl ScrollObserver {
    /// 从元素几何信息创建
    pub fn new(doc_tops: impl IntoIterator<Item = (TargetId, f32)>) -> Self {
        Self {
            doc_tops: doc_tops.into_iter().collect(),
            registrations: Vec::new(),
            last_scroll: None,
        }
    }

    /// 同步滚动位置
    ///
    /// # 参数
    /// - `scroll_y`: 当前滚动位置（文档坐标）
    /// - `viewport_height`: 视口高度
    ///
    /// # 返回
    /// 本次越过阈值的目标，按注册顺序排列
    pub fn sync(&mut self, scroll_y: f32, viewport_height: f32) -> Vec<TargetId> {
        let direction = match self.last_scroll {
            Some(previous) if scroll_y < previous => ScrollDirection::Backward,
            _ => ScrollDirection::Forward,
        };
        self.last_scroll = Some(scroll_y);

        let doc_tops = &self.doc_tops;
        let mut crossed = Vec::new();
        self.registrations.retain(|registration| {
            if registration.spec.direction != direction {
                return true;
            }
            let Some(&doc_top) = doc_tops.get(&registration.target) else {
                return true;
            };
            let line = registration.spec.threshold_fraction * viewport_height;
            if doc_top - scroll_y <= line {
                crossed.push(registration.target);
                false
            } else {
                true
            }
        });
        crossed
    }

    // ========== 查询方法 ==========

    /// 尚未触发的注册数量
    pub fn pending_count(&self) -> usize {
        self.registrations.len()
    }

    /// 目标是否仍在等待触发
    pub fn is_registered(&self, target: TargetId) -> bool {
        self.registrations.iter().any(|r| r.target == target)
    }

    /// 上一次同步的滚动位置
    pub fn last_scroll(&self) -> Option<f32> {
        self.last_scroll
    }
}

impl VisibilityTrigger for ScrollObserver {
    fn register(&mut self, target: TargetId, spec: TriggerSpec) {
        if !self.doc_tops.contains_key(&target) {
            warn!(target = %target, "注册的目标没有几何信息，永远不会触发");
        }
        if self.is_registered(target) {
            return;
        }
        self.registrations.push(Registration { target, spec });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward(fraction: f32) -> TriggerSpec {
        TriggerSpec {
            threshold_fraction: fraction,
            direction: ScrollDirection::Forward,
        }
    }

    fn observer() -> ScrollObserver {
        let mut observer =
            ScrollObserver::new([(TargetId(1), 500.0), (TargetId(2), 1200.0), (TargetId(3), 1300.0)]);
        for id in [1, 2, 3] {
            observer.register(TargetId(id), forward(0.9));
        }
        observer
    }

    #[test]
    fn test_first_sync_fires_elements_past_start_line() {
        let mut observer = observer();
        // 视口高 1000，触发线 900
        assert_eq!(observer.sync(0.0, 1000.0), vec![TargetId(1)]);
        assert_eq!(observer.pending_count(), 2);
    }

    #[test]
    fn test_fires_once_in_registration_order() {
        let mut observer = observer();
        observer.sync(0.0, 1000.0);

        assert_eq!(observer.sync(500.0, 1000.0), vec![TargetId(2), TargetId(3)]);
        assert!(observer.sync(600.0, 1000.0).is_empty());
        assert_eq!(observer.pending_count(), 0);
    }

    #[test]
    fn test_backward_scroll_does_not_fire() {
        let mut observer = ScrollObserver::new([(TargetId(1), 1200.0)]);
        observer.sync(1500.0, 1000.0);
        observer.register(TargetId(1), forward(0.0));
        // 向上滚动，元素已在触发线之上
        assert!(observer.sync(1300.0, 1000.0).is_empty());
        assert!(observer.is_registered(TargetId(1)));
        // 再次向下滚动
        assert_eq!(observer.sync(1350.0, 1000.0), vec![TargetId(1)]);
    }

    #[test]
    fn test_duplicate_registration_ignored() {
        let mut observer = ScrollObserver::new([(TargetId(1), 0.0)]);
        observer.register(TargetId(1), forward(0.9));
        observer.register(TargetId(1), forward(0.9));
        assert_eq!(observer.pending_count(), 1);
    }

    #[test]
    fn test_unknown_geometry_never_fires() {
        let mut observer = ScrollObserver::default();
        observer.register(TargetId(7), forward(0.9));
        assert!(observer.sync(10_000.0, 1000.0).is_empty());
    }
}
