//! # Animation 模块
//!
//! 宿主侧的补间引擎，负责把调度器派发的请求真正插值出来。
//!
//! ## 核心设计理念
//!
//! 动画系统只负责 **时间轴管理**：
//! - 知道某个属性从 A 到 B 需要在 duration 内变化
//! - 每帧把当前值写回对象（通过 `Animatable`）
//! - 延迟期间保持起始值
//!
//! ## 核心概念
//!
//! - `PropertyKey`: 属性键，`TargetId + 属性名`
//! - `Animation`: 单个动画实例，管理 f32 值的时间变化
//! - `AnimatedElement`: 页面元素的 x / y / opacity
//! - `AnimationSystem`: 动画系统管理器，实现 `TweenEngine`
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! let mut system = AnimationSystem::new();
//! let element = Rc::new(AnimatedElement::hidden());
//! system.register(TargetId(1), element.clone());
//!
//! scheduler.on_threshold_crossed(TargetId(1), &clock, &mut system);
//! system.update(1.0 / 60.0);
//! let opacity = element.state().opacity;
//! ```

mod animation;
mod element;
mod system;
mod traits;

pub use animation::{Animation, AnimationId, AnimationState};
pub use element::{AnimatedElement, PROP_OPACITY, PROP_X, PROP_Y};
pub use system::{AnimationError, AnimationSystem};
pub use traits::{Animatable, PropertyKey};

/// 动画事件
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationEvent {
    /// 延迟结束，开始播放
    Started(AnimationId),
    /// 动画完成
    Completed(AnimationId),
}
