//! # System 模块
//!
//! 补间引擎的宿主实现。
//!
//! 对象实现 `Animatable` trait，系统直接设置属性值：
//! ```rust,ignore
//! system.register(id, element.clone());
//! system.animate(request); // 来自 RevealScheduler
//! system.update(dt);       // 值自动应用到对象
//! ```

use std::collections::HashMap;
use std::rc::Rc;

use reveal_runtime::{Easing, TargetId, TweenEngine, TweenRequest, TweenState};
use thiserror::Error;
use tracing::warn;

use super::element::{PROP_OPACITY, PROP_X, PROP_Y};
use super::traits::{Animatable, PropertyKey};
use super::{Animation, AnimationEvent, AnimationId, AnimationState};

/// 动画系统错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// 目标未注册
    #[error("目标 {0} 未注册")]
    NotRegistered(TargetId),

    /// 属性不存在
    #[error("目标 {target} 上不存在属性 '{property}'")]
    UnknownProperty {
        target: TargetId,
        property: &'static str,
    },
}

/// 动画系统
///
/// 管理所有动画实例，提供统一的更新和查询接口。
///
/// ## 设计理念
///
/// 1. 管理时间轴：知道某个属性从 A 到 B 需要在 duration 内变化
/// 2. 直接设置对象属性（通过 Animatable trait）
/// 3. 同一属性的新动画会取代旧动画
pub struct AnimationSystem {
    /// 已注册的对象
    objects: HashMap<TargetId, Rc<dyn Animatable>>,
    /// 动画（PropertyKey -> Animation）
    animations: HashMap<PropertyKey, Animation>,
    /// 下一个动画 ID
    next_anim_id: u64,
    /// 待处理的事件队列
    events: Vec<AnimationEvent>,
}

impl Default for AnimationSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AnimationSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationSystem")
            .field("objects", &self.objects.len())
            .field("animations", &self.animations.len())
            .finish()
    }
}

impl AnimationSystem {
    /// 创建新的动画系统
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            animations: HashMap::new(),
            next_anim_id: 1,
            events: Vec::new(),
        }
    }

    /// 生成下一个动画 ID
    fn next_animation_id(&mut self) -> AnimationId {
        let id = AnimationId::new(self.next_anim_id);
        self.next_anim_id += 1;
        id
    }

    // ========== 对象管理 ==========

    /// 注册可动画对象
    ///
    /// 同一 ID 重复注册时替换旧对象。
    pub fn register<T: Animatable>(&mut self, target: TargetId, object: Rc<T>) {
        self.objects.insert(target, object as Rc<dyn Animatable>);
    }

    /// 检查对象是否已注册
    pub fn is_registered(&self, target: TargetId) -> bool {
        self.objects.contains_key(&target)
    }

    // ========== 动画控制 ==========

    /// 启动对象属性动画
    ///
    /// 起始值立即写入对象，延迟期间保持起始值。
    pub fn animate_property(
        &mut self,
        target: TargetId,
        property_id: &'static str,
        from: f32,
        to: f32,
        duration: f32,
        delay: f32,
        easing: Easing,
    ) -> Result<AnimationId, AnimationError> {
        let object = self
            .objects
            .get(&target)
            .ok_or(AnimationError::NotRegistered(target))?;

        if !object.set_property(property_id, from) {
            return Err(AnimationError::UnknownProperty {
                target,
                property: property_id,
            });
        }

        let key = PropertyKey::new(target, property_id);
        let anim_id = self.next_animation_id();
        let animation = Animation::new(anim_id, from, to, duration)
            .with_delay(delay)
            .with_easing(easing);

        // 取消同一属性的现有动画
        self.animations.insert(key, animation);

        Ok(anim_id)
    }

    /// 更新所有动画
    ///
    /// 延迟结束（Pending → Playing）的动画产生 `Started`，
    /// 播放完毕的动画产生 `Completed` 并被移除。
    ///
    /// # 返回
    /// 返回产生的事件列表
    pub fn update(&mut self, dt: f32) -> Vec<AnimationEvent> {
        let mut completed: Vec<PropertyKey> = Vec::new();

        for (key, animation) in &mut self.animations {
            if animation.is_active() {
                let was_pending = animation.state == AnimationState::Pending;
                animation.update(dt);
                if was_pending && animation.state != AnimationState::Pending {
                    self.events.push(AnimationEvent::Started(animation.id));
                }
                if let Some(object) = self.objects.get(&key.target) {
                    object.set_property(key.property_id, animation.current_value());
                }
            }

            if animation.is_finished() {
                completed.push(*key);
            }
        }

        for key in completed {
            if let Some(animation) = self.animations.remove(&key) {
                self.events.push(AnimationEvent::Completed(animation.id));
            }
        }

        std::mem::take(&mut self.events)
    }

    // ========== 查询方法 ==========

    /// 检查是否有活跃的动画
    pub fn has_active_animations(&self) -> bool {
        self.animations.values().any(|a| a.is_active())
    }

    /// 检查对象是否有活跃的动画
    pub fn has_target_animations(&self, target: TargetId) -> bool {
        self.animations
            .iter()
            .any(|(key, anim)| key.target == target && anim.is_active())
    }

    /// 获取活跃动画数量
    pub fn active_count(&self) -> usize {
        self.animations.values().filter(|a| a.is_active()).count()
    }

    /// 获取对象属性的当前值
    pub fn get_property(&self, target: TargetId, property_id: &str) -> Option<f32> {
        self.objects.get(&target)?.get_property(property_id)
    }

    /// 读取对象的完整补间状态
    pub fn state_of(&self, target: TargetId) -> Option<TweenState> {
        Some(TweenState {
            x: self.get_property(target, PROP_X)?,
            y: self.get_property(target, PROP_Y)?,
            opacity: self.get_property(target, PROP_OPACITY)?,
        })
    }
}

impl TweenEngine for AnimationSystem {
    fn animate(&mut self, request: TweenRequest) {
        let tracks = [
            (PROP_X, request.from.x, request.to.x),
            (PROP_Y, request.from.y, request.to.y),
            (PROP_OPACITY, request.from.opacity, request.to.opacity),
        ];
        for (property, from, to) in tracks {
            if let Err(e) = self.animate_property(
                request.target,
                property,
                from,
                to,
                request.duration,
                request.delay,
                request.easing,
            ) {
                warn!(error = %e, "补间请求无法执行");
                return;
            }
        }
    }

    fn set(&mut self, target: TargetId, state: TweenState) {
        let Some(object) = self.objects.get(&target) else {
            warn!(target = %target, "立即设置的目标未注册");
            return;
        };
        object.set_property(PROP_X, state.x);
        object.set_property(PROP_Y, state.y);
        object.set_property(PROP_OPACITY, state.opacity);
        self.animations.retain(|key, _| key.target != target);
    }
}
