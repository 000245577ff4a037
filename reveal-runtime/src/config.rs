//! # Config 模块
//!
//! 调度器的进程级默认值。
//!
//! 不同部署使用不同预设：
//!
//! | 预设 | 时长 | 组内步长 | 触发位置 |
//! |---|---|---|---|
//! | `standard` | 0.75 s | 0.1 s | 视口 90% |
//! | `relaxed` | 0.85 s | 0.15 s | 视口 85% |

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::ConfigError;

/// 配置预设
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealProfile {
    #[default]
    Standard,
    Relaxed,
}

impl FromStr for RevealProfile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "relaxed" => Ok(Self::Relaxed),
            _ => Err(ConfigError::UnknownProfile {
                name: s.to_string(),
            }),
        }
    }
}

/// 视口宽度与过渡距离的对应关系
///
/// 宽度大于断点时使用较大距离，小于等于断点时使用较小距离。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportPolicy {
    /// 宽度断点（像素）
    #[serde(default = "default_breakpoint")]
    pub breakpoint: f32,
    /// 宽屏过渡距离（像素）
    #[serde(default = "default_wide_distance")]
    pub wide_distance: f32,
    /// 窄屏过渡距离（像素）
    #[serde(default = "default_narrow_distance")]
    pub narrow_distance: f32,
}

impl Default for ViewportPolicy {
    fn default() -> Self {
        Self {
            breakpoint: default_breakpoint(),
            wide_distance: default_wide_distance(),
            narrow_distance: default_narrow_distance(),
        }
    }
}

impl ViewportPolicy {
    /// 根据视口宽度计算过渡距离
    pub fn transition_distance(&self, viewport_width: f32) -> f32 {
        if viewport_width > self.breakpoint {
            self.wide_distance
        } else {
            self.narrow_distance
        }
    }
}

/// 调度配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealConfig {
    /// 默认动画时长（秒）
    pub default_duration: f32,
    /// 默认组内步长（秒）
    pub default_group_delay_step: f32,
    /// 触发位置（视口高度比例，从顶部算起）
    pub trigger_fraction: f32,
    /// 视口策略
    #[serde(default)]
    pub viewport: ViewportPolicy,
    /// 缓动曲线
    #[serde(default)]
    pub easing: Easing,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::from_profile(RevealProfile::default())
    }
}

impl RevealConfig {
    /// 按预设创建配置
    pub fn from_profile(profile: RevealProfile) -> Self {
        let (default_duration, default_group_delay_step, trigger_fraction) = match profile {
            RevealProfile::Standard => (0.75, 0.1, 0.9),
            RevealProfile::Relaxed => (0.85, 0.15, 0.85),
        };
        Self {
            default_duration,
            default_group_delay_step,
            trigger_fraction,
            viewport: ViewportPolicy::default(),
            easing: Easing::default(),
        }
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_duration.is_nan() || self.default_duration <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "default_duration",
                value: self.default_duration,
            });
        }

        if self.default_group_delay_step.is_nan() || self.default_group_delay_step < 0.0 {
            return Err(ConfigError::Negative {
                field: "default_group_delay_step",
                value: self.default_group_delay_step,
            });
        }

        if !(0.0..=1.0).contains(&self.trigger_fraction) {
            return Err(ConfigError::FractionOutOfRange {
                field: "trigger_fraction",
                value: self.trigger_fraction,
            });
        }

        let distances = [
            ("viewport.wide_distance", self.viewport.wide_distance),
            ("viewport.narrow_distance", self.viewport.narrow_distance),
        ];
        for (field, value) in distances {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if let Easing::CubicBezier(curve) = self.easing {
            if !curve.is_valid() {
                return Err(ConfigError::InvalidEasing {
                    x1: curve.x1,
                    x2: curve.x2,
                });
            }
        }

        Ok(())
    }
}

// 默认值函数
fn default_breakpoint() -> f32 {
    600.0
}

fn default_wide_distance() -> f32 {
    75.0
}

fn default_narrow_distance() -> f32 {
    40.0
}
