//! # Host 层
//!
//! 入场动画调度器的无界面宿主实现。
//!
//! ## 架构说明
//!
//! Host 层负责：
//! - 页面与脚本加载（JSON）
//! - 模拟滚动观察（可见性触发）
//! - 补间插值
//! - 视口变化与跑马灯
//! - 配置与日志
//!
//! Host 层不包含调度逻辑，分组与延迟计算全部在 `reveal-runtime` 中完成。

pub mod animation;
pub mod clock;
pub mod config;
pub mod debounce;
pub mod marquee;
pub mod observer;
pub mod page;
pub mod session;

pub use animation::{
    Animatable, AnimatedElement, Animation, AnimationError, AnimationEvent, AnimationId,
    AnimationState, AnimationSystem, PropertyKey,
};
pub use clock::ManualClock;
pub use config::{AppConfig, ConfigError, DebugConfig, MarqueeConfig, RevealSettings, SimulationConfig};
pub use debounce::Debouncer;
pub use marquee::Marquee;
pub use observer::ScrollObserver;
pub use page::{
    MarqueeElement, PageDocument, PageElement, PageError, ScrollAction, ScrollScript, ScrollStep,
    Viewport,
};
pub use session::{DispatchKind, DispatchRecord, RevealSession};
