//! # Scheduler 模块
//!
//! 入场动画调度器。
//!
//! ## 执行模型
//!
//! ```text
//! initialize(elements)          -> 立即显示视口上方的元素，其余注册一次性触发
//! on_threshold_crossed(id, now) -> 分组、计算延迟、派发补间
//! on_resize(width)              -> 重新计算过渡距离
//! ```
//!
//! 调度器是单线程的；分组只取决于相继处理的触发之间的时间间隔。

use std::collections::HashMap;

use crate::capability::{Clock, ScrollDirection, TriggerSpec, TweenEngine, VisibilityTrigger};
use crate::config::RevealConfig;
use crate::diagnostic::ResolveDiagnostic;
use crate::grouping::GroupingState;
use crate::target::{ElementSnapshot, RevealTarget, TargetId};
use crate::tween::{TweenRequest, TweenState};

/// 一次触发的处理结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DispatchOutcome {
    /// 已派发补间
    Dispatched(TweenRequest),
    /// 该目标此前已经派发过，本次忽略
    AlreadyFired,
    /// 不是由调度器管理的目标（未知，或初始化时已立即显示）
    NotScheduled,
}

impl DispatchOutcome {
    /// 取出派发的请求
    pub fn request(&self) -> Option<&TweenRequest> {
        match self {
            DispatchOutcome::Dispatched(request) => Some(request),
            _ => None,
        }
    }
}

/// 入场动画调度器
///
/// 持有所有目标与唯一的 [`GroupingState`]。
pub struct RevealScheduler {
    /// 调度配置
    config: RevealConfig,
    /// 等待触发或已触发的目标
    targets: Vec<RevealTarget>,
    /// TargetId -> targets 下标
    index: HashMap<TargetId, usize>,
    /// 初始化时立即显示的目标
    revealed_at_init: Vec<TargetId>,
    /// 错峰分组状态
    grouping: GroupingState,
    /// 当前过渡距离（像素）
    transition_distance: f32,
    /// 属性回退诊断
    diagnostics: Vec<ResolveDiagnostic>,
}

impl std::fmt::Debug for RevealScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealScheduler")
            .field("targets", &self.targets.len())
            .field("revealed_at_init", &self.revealed_at_init.len())
            .field("transition_distance", &self.transition_distance)
            .finish()
    }
}

impl RevealScheduler {
    /// 扫描元素并初始化调度器
    ///
    /// # 参数
    /// - `config`: 调度配置
    /// - `elements`: 页面中所有带标记的元素（只扫描这一次）
    /// - `viewport_width`: 当前视口宽度
    /// - `trigger`: 可见性触发机制
    /// - `engine`: 补间引擎
    ///
    /// 已完全位于视口上方的元素立即设为最终状态，不注册触发，也不参与分组。
    pub fn initialize<I, T, E>(
        config: RevealConfig,
        elements: I,
        viewport_width: f32,
        trigger: &mut T,
        engine: &mut E,
    ) -> Self
    where
        I: IntoIterator<Item = ElementSnapshot>,
        T: VisibilityTrigger + ?Sized,
        E: TweenEngine + ?Sized,
    {
        let mut scheduler = Self {
            config,
            targets: Vec::new(),
            index: HashMap::new(),
            revealed_at_init: Vec::new(),
            grouping: GroupingState::new(),
            transition_distance: config.viewport.transition_distance(viewport_width),
            diagnostics: Vec::new(),
        };

        let spec = TriggerSpec {
            threshold_fraction: config.trigger_fraction,
            direction: ScrollDirection::Forward,
        };

        for element in elements {
            if scheduler.index.contains_key(&element.id)
                || scheduler.revealed_at_init.contains(&element.id)
            {
                continue;
            }

            let target = RevealTarget::resolve(
                element.id,
                &element.attributes,
                &scheduler.config,
                &mut scheduler.diagnostics,
            );

            if element.is_above_viewport() {
                engine.set(element.id, TweenState::revealed());
                scheduler.revealed_at_init.push(element.id);
                continue;
            }

            trigger.register(element.id, spec);
            scheduler.index.insert(element.id, scheduler.targets.len());
            scheduler.targets.push(target);
        }

        scheduler
    }

    /// 处理元素越过触发阈值
    ///
    /// 每个目标至多派发一次；重复通知返回 [`DispatchOutcome::AlreadyFired`]。
    pub fn on_threshold_crossed<C, E>(
        &mut self,
        id: TargetId,
        clock: &C,
        engine: &mut E,
    ) -> DispatchOutcome
    where
        C: Clock + ?Sized,
        E: TweenEngine + ?Sized,
    {
        let Some(&slot) = self.index.get(&id) else {
            return DispatchOutcome::NotScheduled;
        };
        let target = &mut self.targets[slot];
        if target.has_fired() {
            return DispatchOutcome::AlreadyFired;
        }

        let delay = match target.explicit_delay {
            Some(delay) => delay,
            None => self
                .grouping
                .next_delay(clock.now(), target.group_delay_step),
        };

        let (x, y) = target.variant.start_offset(self.transition_distance);
        let request = TweenRequest {
            target: id,
            from: TweenState::hidden(x, y),
            to: TweenState::revealed(),
            duration: target.duration,
            delay,
            easing: self.config.easing,
        };

        target.mark_fired();
        engine.animate(request);
        DispatchOutcome::Dispatched(request)
    }

    /// 视口尺寸变化
    ///
    /// 已派发的动画不受影响，尚未触发的目标在触发时使用新的距离。
    pub fn on_resize(&mut self, viewport_width: f32) {
        self.transition_distance = self.config.viewport.transition_distance(viewport_width);
    }

    // ========== 查询方法 ==========

    /// 当前过渡距离
    pub fn transition_distance(&self) -> f32 {
        self.transition_distance
    }

    /// 调度配置
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// 当前分组状态
    pub fn grouping(&self) -> &GroupingState {
        &self.grouping
    }

    /// 受调度的目标（不含初始化时立即显示的目标）
    pub fn targets(&self) -> &[RevealTarget] {
        &self.targets
    }

    /// 按 ID 查询目标
    pub fn target(&self, id: TargetId) -> Option<&RevealTarget> {
        self.index.get(&id).map(|&slot| &self.targets[slot])
    }

    /// 初始化时立即显示的目标
    pub fn revealed_at_init(&self) -> &[TargetId] {
        &self.revealed_at_init
    }

    /// 尚未派发的目标数量
    pub fn pending_count(&self) -> usize {
        self.targets.iter().filter(|t| !t.has_fired()).count()
    }

    /// 属性回退诊断
    pub fn diagnostics(&self) -> &[ResolveDiagnostic] {
        &self.diagnostics
    }
}
