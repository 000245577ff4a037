//! # Tween 模块
//!
//! 发往补间引擎的状态与请求。调度器只描述"从哪里到哪里"，插值由引擎负责。

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::target::TargetId;

/// 补间状态：位移与不透明度
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TweenState {
    /// 水平位移（像素）
    pub x: f32,
    /// 垂直位移（像素）
    pub y: f32,
    /// 不透明度 (0.0 - 1.0)
    pub opacity: f32,
}

impl TweenState {
    /// 隐藏状态，带起始位移
    pub const fn hidden(x: f32, y: f32) -> Self {
        Self { x, y, opacity: 0.0 }
    }

    /// 最终状态：完全不透明、无位移
    pub const fn revealed() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            opacity: 1.0,
        }
    }

    /// 线性插值到另一个状态
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            opacity: self.opacity + (other.opacity - self.opacity) * t,
        }
    }
}

impl Default for TweenState {
    fn default() -> Self {
        Self::revealed()
    }
}

/// 一次入场动画请求
///
/// 发出即忘：调度器不会等待完成。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TweenRequest {
    /// 目标元素
    pub target: TargetId,
    /// 起始状态
    pub from: TweenState,
    /// 结束状态
    pub to: TweenState,
    /// 时长（秒）
    pub duration: f32,
    /// 启动延迟（秒）
    pub delay: f32,
    /// 缓动
    pub easing: Easing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revealed_state() {
        let s = TweenState::revealed();
        assert_eq!((s.x, s.y, s.opacity), (0.0, 0.0, 1.0));
        assert_eq!(TweenState::default(), s);
    }

    #[test]
    fn test_lerp() {
        let from = TweenState::hidden(-40.0, 0.0);
        let to = TweenState::revealed();
        let mid = from.lerp(&to, 0.5);
        assert_eq!(mid.x, -20.0);
        assert_eq!(mid.y, 0.0);
        assert!((mid.opacity - 0.5).abs() < 1e-6);
    }
}
