//! # Easing 模块
//!
//! 缓动曲线。入场动画统一使用 [`CubicBezier::REVEAL`]。

use serde::{Deserialize, Serialize};

/// 三次贝塞尔曲线控制点
///
/// 端点固定为 `(0, 0)` 与 `(1, 1)`，`x1`、`x2` 必须位于 `[0, 1]`。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    /// 入场动画曲线 `cubic-bezier(0.5, 1, 0.89, 1)`
    pub const REVEAL: CubicBezier = CubicBezier::new(0.5, 1.0, 0.89, 1.0);

    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// 控制点 x 是否合法
    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.x1) && (0.0..=1.0).contains(&self.x2)
    }

    /// 计算进度 `progress` 处的缓动值
    pub fn evaluate(&self, progress: f32) -> f32 {
        if progress <= 0.0 {
            return 0.0;
        }
        if progress >= 1.0 {
            return 1.0;
        }

        let t = self.solve_t(progress);
        bezier_component(self.y1, self.y2, t)
    }

    /// 求解 x(t) = target 对应的参数 t
    ///
    /// 先用 Newton-Raphson，导数过小或未收敛时退回二分。
    fn solve_t(&self, target: f32) -> f32 {
        let mut t = target;
        for _ in 0..8 {
            let x = bezier_component(self.x1, self.x2, t) - target;
            if x.abs() < 1e-6 {
                return t;
            }
            let dx = bezier_derivative(self.x1, self.x2, t);
            if dx.abs() < 1e-6 {
                break;
            }
            t = (t - x / dx).clamp(0.0, 1.0);
        }

        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        t = target;
        for _ in 0..32 {
            let x = bezier_component(self.x1, self.x2, t);
            if (x - target).abs() < 1e-6 {
                break;
            }
            if x < target {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }
}

/// 单轴贝塞尔分量：3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_component(p1: f32, p2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

#[inline]
fn bezier_derivative(p1: f32, p2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

/// 缓动函数类型
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Easing {
    /// 线性（匀速），跑马灯使用
    Linear,
    /// 二次缓出
    EaseOutQuad,
    /// 自定义三次贝塞尔
    CubicBezier(CubicBezier),
}

impl Default for Easing {
    fn default() -> Self {
        Easing::CubicBezier(CubicBezier::REVEAL)
    }
}

impl Easing {
    /// 计算缓动值
    ///
    /// # 参数
    /// - `t`: 时间进度 (0.0 - 1.0)，超出范围会被限制
    ///
    /// # 返回
    /// - 缓动后的进度值
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::CubicBezier(curve) => curve.evaluate(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        let easing = Easing::Linear;
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(0.5), 0.5);
        assert_eq!(easing.apply(1.0), 1.0);
    }

    #[test]
    fn test_clamp() {
        let easing = Easing::Linear;
        assert_eq!(easing.apply(-0.5), 0.0);
        assert_eq!(easing.apply(1.5), 1.0);
    }

    #[test]
    fn test_reveal_curve_endpoints() {
        let easing = Easing::default();
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(1.0), 1.0);
    }

    #[test]
    fn test_reveal_curve_is_ease_out() {
        // y1 = y2 = 1：前半段就接近终点
        let curve = CubicBezier::REVEAL;
        let quarter = curve.evaluate(0.25);
        let half = curve.evaluate(0.5);
        assert!(quarter > 0.25);
        assert!(half > 0.7);
        assert!(half <= 1.0);
    }

    #[test]
    fn test_reveal_curve_monotonic() {
        let curve = CubicBezier::REVEAL;
        let mut prev = 0.0;
        for i in 1..=20 {
            let v = curve.evaluate(i as f32 / 20.0);
            assert!(v + 1e-4 >= prev, "曲线在 {} 处下降", i);
            prev = v;
        }
    }

    #[test]
    fn test_linear_bezier_matches_identity() {
        let curve = CubicBezier::new(1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((curve.evaluate(t) - t).abs() < 1e-3);
        }
    }

    #[test]
    fn test_ease_out_quad() {
        let easing = Easing::EaseOutQuad;
        assert!((easing.apply(0.5) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_validity() {
        assert!(CubicBezier::REVEAL.is_valid());
        assert!(!CubicBezier::new(1.5, 0.0, 0.5, 1.0).is_valid());
        assert!(!CubicBezier::new(0.2, 0.0, -0.1, 1.0).is_valid());
    }
}
