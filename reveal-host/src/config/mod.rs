//! # Config 模块
//!
//! 宿主配置管理，集中管理所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）
//!
//! ## 示例
//!
//! ```json
//! {
//!   "reveal": { "profile": "relaxed", "default_duration": 0.9 },
//!   "marquee": { "resize_debounce_ms": 150 },
//!   "debug": { "log_level": "debug" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use reveal_runtime::{Easing, RevealConfig, RevealProfile, ViewportPolicy};

/// 应用配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 入场动画配置
    #[serde(default)]
    pub reveal: RevealSettings,

    /// 跑马灯配置
    #[serde(default)]
    pub marquee: MarqueeConfig,

    /// 回放配置
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// 调试配置
    #[serde(default)]
    pub debug: DebugConfig,
}

/// 入场动画配置
///
/// 先选预设，再按字段覆盖。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevealSettings {
    /// 配置预设（standard / relaxed）
    #[serde(default)]
    pub profile: RevealProfile,

    /// 覆盖默认时长（秒）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_duration: Option<f32>,

    /// 覆盖默认组内步长（秒）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_group_delay_step: Option<f32>,

    /// 覆盖触发位置（视口高度比例）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_fraction: Option<f32>,

    /// 覆盖缓动曲线（默认 `cubic-bezier(0.5, 1, 0.89, 1)`）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<Easing>,

    /// 视口策略
    #[serde(default)]
    pub viewport: ViewportPolicy,

    /// 静态预览模式：所有元素直接显示最终状态
    #[serde(default)]
    pub static_preview: bool,
}

/// 跑马灯配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarqueeConfig {
    /// 每个条目的默认时长（秒）
    #[serde(default = "default_duration_per_item")]
    pub default_duration_per_item: f32,

    /// 视口变化后重新播放的去抖延迟（毫秒）
    #[serde(default)]
    pub resize_debounce_ms: u64,
}

/// 回放配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// 帧间隔（秒）
    #[serde(default = "default_frame_interval")]
    pub frame_interval: f32,

    /// 脚本结束后最多继续推进的时间（秒），等待动画播放完毕
    #[serde(default = "default_settle_limit")]
    pub settle_limit: f32,
}

/// 调试配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugConfig {
    /// 日志级别（trace / debug / info / warn / error）
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// 默认值函数
fn default_duration_per_item() -> f32 {
    2.5
}

fn default_frame_interval() -> f32 {
    1.0 / 60.0
}

fn default_settle_limit() -> f32 {
    10.0
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            default_duration_per_item: default_duration_per_item(),
            resize_debounce_ms: 0,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frame_interval: default_frame_interval(),
            settle_limit: default_settle_limit(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl RevealSettings {
    /// 合并预设与覆盖项，得到调度配置
    pub fn to_reveal_config(&self) -> RevealConfig {
        let mut config = RevealConfig::from_profile(self.profile);
        if let Some(duration) = self.default_duration {
            config.default_duration = duration;
        }
        if let Some(step) = self.default_group_delay_step {
            config.default_group_delay_step = step;
        }
        if let Some(fraction) = self.trigger_fraction {
            config.trigger_fraction = fraction;
        }
        if let Some(easing) = self.easing {
            config.easing = easing;
        }
        config.viewport = self.viewport;
        config
    }
}

impl AppConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并打印警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = ?path, "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    info!(path = ?path, "配置文件加载成功");
                    config
                }
                Err(e) => {
                    warn!(error = %e, "配置文件解析失败，使用默认配置");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(error = %e, "配置文件读取失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// 调度配置
    pub fn reveal_config(&self) -> RevealConfig {
        self.reveal.to_reveal_config()
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.reveal_config().validate().map_err(ConfigError::Reveal)?;

        if self.marquee.default_duration_per_item.is_nan()
            || self.marquee.default_duration_per_item <= 0.0
        {
            return Err(ConfigError::ValidationFailed(
                "跑马灯每条目时长必须大于 0".to_string(),
            ));
        }

        if self.simulation.frame_interval.is_nan() || self.simulation.frame_interval <= 0.0 {
            return Err(ConfigError::ValidationFailed(
                "帧间隔必须大于 0".to_string(),
            ));
        }

        if self.simulation.settle_limit.is_nan() || self.simulation.settle_limit < 0.0 {
            return Err(ConfigError::ValidationFailed(
                "收尾时间不能为负数".to_string(),
            ));
        }

        if self.log_level().is_none() {
            return Err(ConfigError::ValidationFailed(format!(
                "未知的日志级别: {}",
                self.debug.log_level
            )));
        }

        Ok(())
    }

    /// 解析日志级别
    pub fn log_level(&self) -> Option<tracing::Level> {
        self.debug.log_level.trim().parse().ok()
    }
}

/// 配置错误
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 序列化失败
    SerializationFailed(String),
    /// IO 错误
    IoError(String),
    /// 验证失败
    ValidationFailed(String),
    /// 调度配置无效
    Reveal(reveal_runtime::ConfigError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::SerializationFailed(e) => write!(f, "配置序列化失败: {}", e),
            ConfigError::IoError(e) => write!(f, "配置 IO 错误: {}", e),
            ConfigError::ValidationFailed(e) => write!(f, "配置验证失败: {}", e),
            ConfigError::Reveal(e) => write!(f, "调度配置无效: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.reveal.profile, RevealProfile::Standard);
        assert_eq!(config.marquee.default_duration_per_item, 2.5);
        assert_eq!(config.marquee.resize_debounce_ms, 0);
        assert_eq!(config.debug.log_level, "info");
        assert!(!config.reveal.static_preview);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_profile_and_overrides() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "reveal": { "profile": "relaxed", "default_duration": 0.5 } }"#,
        )
        .unwrap();

        let reveal = config.reveal_config();
        assert_eq!(reveal.default_duration, 0.5);
        assert_eq!(reveal.default_group_delay_step, 0.15);
        assert_eq!(reveal.trigger_fraction, 0.85);
        assert_eq!(reveal.viewport.breakpoint, 600.0);
    }

    /// 缓动曲线可以被覆盖，越界的贝塞尔在校验时被拒绝
    #[test]
    fn test_easing_override() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "reveal": { "easing": { "type": "ease_out_quad" } } }"#)
                .unwrap();
        assert_eq!(config.reveal_config().easing, Easing::EaseOutQuad);
        assert!(config.validate().is_ok());

        let config: AppConfig = serde_json::from_str(
            r#"{ "reveal": { "easing": { "type": "cubic_bezier", "x1": 0.5, "y1": 1, "x2": 1.2, "y2": 1 } } }"#,
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Reveal(_))));

        assert_eq!(AppConfig::default().reveal_config().easing, Easing::default());
    }

    #[test]
    fn test_partial_viewport_policy() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "reveal": { "viewport": { "narrow_distance": 20 } } }"#)
                .unwrap();
        assert_eq!(config.reveal.viewport.narrow_distance, 20.0);
        assert_eq!(config.reveal.viewport.wide_distance, 75.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.reveal.default_duration = Some(0.0);
        assert!(matches!(config.validate(), Err(ConfigError::Reveal(_))));

        let mut config = AppConfig::default();
        config.reveal.trigger_fraction = Some(1.5);
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.debug.log_level = "loud".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = AppConfig::load("/definitely/not/here/config.json");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ broken").unwrap();

        assert_eq!(AppConfig::load(&path), AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AppConfig::default();
        config.reveal.profile = RevealProfile::Relaxed;
        config.reveal.static_preview = true;
        config.marquee.resize_debounce_ms = 150;
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path);
        assert_eq!(loaded, config);
    }
}
