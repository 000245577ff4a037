//! # Animation 模块
//!
//! 通用动画实例定义。
//!
//! 核心设计：动画只关注 f32 值的时间轴变化，不假设对象类型。

use reveal_runtime::Easing;

/// 动画 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(pub u64);

impl AnimationId {
    /// 创建新的动画 ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// 动画状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// 等待开始（有延迟）
    #[default]
    Pending,
    /// 正在播放
    Playing,
    /// 已完成
    Completed,
}

impl AnimationState {
    /// 是否为活跃状态（需要更新）
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Playing)
    }

    /// 是否已结束
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// 通用动画实例
///
/// 管理单个 f32 值从 `from` 到 `to` 在 `duration` 时间内的变化。
/// 延迟期间保持起始值。
#[derive(Debug, Clone)]
pub struct Animation {
    /// 动画 ID
    pub id: AnimationId,
    /// 起始值
    pub from: f32,
    /// 目标值
    pub to: f32,
    /// 动画时长（秒）
    pub duration: f32,
    /// 缓动函数
    pub easing: Easing,
    /// 延迟启动（秒）
    pub delay: f32,
    /// 当前状态
    pub state: AnimationState,
    /// 当前进度（0.0 - 1.0，已应用缓动）
    pub progress: f32,
    /// 已经过的时间
    elapsed: f32,
}

impl Animation {
    /// 创建新的动画
    pub fn new(id: AnimationId, from: f32, to: f32, duration: f32) -> Self {
        Self {
            id,
            from,
            to,
            duration: duration.max(0.0),
            easing: Easing::default(),
            delay: 0.0,
            state: AnimationState::Pending,
            progress: 0.0,
            elapsed: 0.0,
        }
    }

    /// 设置缓动函数
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// 设置延迟
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    /// 更新动画
    ///
    /// # 返回
    /// - `true`: 动画仍在进行中
    /// - `false`: 动画已结束
    pub fn update(&mut self, dt: f32) -> bool {
        match self.state {
            AnimationState::Pending => {
                self.elapsed += dt;
                if self.elapsed >= self.delay {
                    self.state = AnimationState::Playing;
                    self.elapsed -= self.delay;
                    self.update_playing(self.elapsed)
                } else {
                    true
                }
            }
            AnimationState::Playing => {
                self.elapsed += dt;
                self.update_playing(self.elapsed)
            }
            AnimationState::Completed => false,
        }
    }

    /// 更新播放中的动画
    fn update_playing(&mut self, elapsed: f32) -> bool {
        if self.duration <= 0.0 {
            self.progress = 1.0;
            self.state = AnimationState::Completed;
            return false;
        }

        let raw_progress = elapsed / self.duration;
        if raw_progress >= 1.0 {
            self.progress = 1.0;
            self.state = AnimationState::Completed;
            false
        } else {
            self.progress = self.easing.apply(raw_progress);
            true
        }
    }

    /// 获取当前值
    pub fn current_value(&self) -> f32 {
        self.from + (self.to - self.from) * self.progress
    }

    /// 是否正在播放
    pub fn is_playing(&self) -> bool {
        self.state == AnimationState::Playing
    }

    /// 是否已结束
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// 是否为活跃状态
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_animation() -> Animation {
        Animation::new(AnimationId::new(1), 0.0, 1.0, 1.0).with_easing(Easing::Linear)
    }

    #[test]
    fn test_animation_creation() {
        let anim = create_test_animation();
        assert_eq!(anim.state, AnimationState::Pending);
        assert_eq!(anim.progress, 0.0);
        assert_eq!(anim.from, 0.0);
        assert_eq!(anim.to, 1.0);
    }

    #[test]
    fn test_animation_update() {
        let mut anim = create_test_animation();

        // 开始时是 Pending
        assert!(anim.update(0.1));
        assert_eq!(anim.state, AnimationState::Playing);

        // 进行中
        assert!(anim.update(0.4));
        assert!((anim.current_value() - 0.5).abs() < 1e-5);

        // 完成
        assert!(!anim.update(0.6));
        assert_eq!(anim.state, AnimationState::Completed);
        assert_eq!(anim.current_value(), 1.0);
    }

    #[test]
    fn test_delay_holds_start_value() {
        let mut anim = Animation::new(AnimationId::new(1), -75.0, 0.0, 0.5).with_delay(0.2);

        assert!(anim.update(0.1));
        assert_eq!(anim.state, AnimationState::Pending);
        assert_eq!(anim.current_value(), -75.0);

        assert!(anim.update(0.15));
        assert!(anim.is_playing());
        assert!(anim.current_value() > -75.0);
    }

    #[test]
    fn test_zero_duration_completes_on_first_update() {
        let mut anim = Animation::new(AnimationId::new(1), 0.0, 1.0, 0.0);
        assert!(!anim.update(0.0));
        assert_eq!(anim.current_value(), 1.0);
    }
}
