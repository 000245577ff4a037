//! # Reveal Runtime
//!
//! 滚动入场动画的核心调度库。
//!
//! ## 架构概述
//!
//! `reveal-runtime` 是纯逻辑核心，不依赖任何 IO、日志或渲染引擎。
//! 它通过 **能力接口** 与宿主层（Host）通信：
//!
//! ```text
//! Host                                  Runtime
//!   │                                      │
//!   │──── ElementSnapshot / Viewport ─────►│ initialize()
//!   │◄─── VisibilityTrigger::register ─────│
//!   │                                      │
//!   │──── on_threshold_crossed(id) ───────►│ 分组 + 计算延迟
//!   │◄─── TweenEngine::animate ────────────│
//! ```
//!
//! ## 核心类型
//!
//! - [`RevealScheduler`]：调度器，持有所有目标与分组状态
//! - [`RevealTarget`]：单个入场动画目标
//! - [`GroupingState`]：错峰分组状态
//! - [`TweenRequest`]：发往补间引擎的动画请求
//!
//! ## 模块结构
//!
//! - [`attribute`]：元素属性解析（含毫秒/秒单位推断）
//! - [`variant`]：动画变体
//! - [`target`]：目标定义与属性解析
//! - [`grouping`]：错峰分组
//! - [`easing`]：缓动曲线
//! - [`tween`]：补间状态与请求
//! - [`capability`]：宿主能力接口
//! - [`config`]：调度配置与预设
//! - [`diagnostic`]：配置回退诊断
//! - [`scheduler`]：调度器

pub mod attribute;
pub mod capability;
pub mod config;
pub mod diagnostic;
pub mod easing;
pub mod error;
pub mod grouping;
pub mod scheduler;
pub mod target;
pub mod tween;
pub mod variant;

// 重导出核心类型
pub use attribute::{
    ElementAttributes, parse_duration_attribute, parse_float_prefix, parse_numeric_literal,
};
pub use capability::{
    Clock, FixedClock, RecordingEngine, RecordingTrigger, ScrollDirection, TriggerSpec, TweenEngine,
    VisibilityTrigger,
};
pub use config::{RevealConfig, RevealProfile, ViewportPolicy};
pub use diagnostic::{FallbackReason, ResolveDiagnostic};
pub use easing::{CubicBezier, Easing};
pub use error::{AttributeError, ConfigError};
pub use grouping::{GROUPING_WINDOW_SECS, GroupingState};
pub use scheduler::{DispatchOutcome, RevealScheduler};
pub use target::{ElementSnapshot, RevealTarget, TargetId};
pub use tween::{TweenRequest, TweenState};
pub use variant::RevealVariant;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        // 验证所有公共类型都可以正常使用
        let _variant = RevealVariant::SlideUp;
        let _state = TweenState::revealed();
        let _grouping = GroupingState::new();
        let _config = RevealConfig::default();
        let _easing = Easing::default();
    }
}
