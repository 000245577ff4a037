//! # Capability 模块
//!
//! 调度器依赖的宿主能力。宿主实现这些 trait，测试中可替换为合成实现。
//!
//! - [`VisibilityTrigger`]：可见性触发注册
//! - [`TweenEngine`]：补间引擎
//! - [`Clock`]：单调时钟

use serde::{Deserialize, Serialize};

use crate::target::TargetId;
use crate::tween::{TweenRequest, TweenState};

/// 滚动方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    /// 向下滚动
    Forward,
    /// 向上滚动
    Backward,
}

/// 触发条件
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriggerSpec {
    /// 元素顶边越过视口高度的该比例位置时触发（从顶部算起）
    pub threshold_fraction: f32,
    /// 只在该方向的滚动中触发
    pub direction: ScrollDirection,
}

/// 可见性触发机制
///
/// 注册后，宿主在元素首次越过阈值时调用
/// [`crate::RevealScheduler::on_threshold_crossed`]，每个元素至多一次。
pub trait VisibilityTrigger {
    /// 注册一次性触发
    fn register(&mut self, target: TargetId, spec: TriggerSpec);
}

/// 补间引擎
pub trait TweenEngine {
    /// 发起一次补间（发出即忘）
    fn animate(&mut self, request: TweenRequest);

    /// 立即把目标设置为指定状态
    fn set(&mut self, target: TargetId, state: TweenState);
}

/// 单调时钟
pub trait Clock {
    /// 当前时间（秒）
    fn now(&self) -> f64;
}

/// 记录型实现，便于在测试中检查调度器的调用
#[derive(Debug, Clone, Default)]
pub struct RecordingEngine {
    /// 收到的补间请求
    pub animations: Vec<TweenRequest>,
    /// 收到的立即设置
    pub sets: Vec<(TargetId, TweenState)>,
}

impl TweenEngine for RecordingEngine {
    fn animate(&mut self, request: TweenRequest) {
        self.animations.push(request);
    }

    fn set(&mut self, target: TargetId, state: TweenState) {
        self.sets.push((target, state));
    }
}

/// 记录型触发注册
#[derive(Debug, Clone, Default)]
pub struct RecordingTrigger {
    /// 已注册的目标
    pub registered: Vec<(TargetId, TriggerSpec)>,
}

impl VisibilityTrigger for RecordingTrigger {
    fn register(&mut self, target: TargetId, spec: TriggerSpec) {
        self.registered.push((target, spec));
    }
}

/// 固定时间时钟
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn now(&self) -> f64 {
        self.0
    }
}
