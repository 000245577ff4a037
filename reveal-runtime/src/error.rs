//! # Error 模块
//!
//! 定义 reveal-runtime 中使用的错误类型。
//!
//! 属性错误不会向外传播：调度器把它们转成诊断并回退到默认值。

use thiserror::Error;

/// 属性解析错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttributeError {
    /// 属性值为空
    #[error("属性 '{attribute}' 的值为空")]
    Empty { attribute: &'static str },

    /// 无法解析为数字
    #[error("属性 '{attribute}' 的值 '{raw}' 不是数字")]
    NotANumber { attribute: &'static str, raw: String },

    /// 数值超出允许范围
    #[error("属性 '{attribute}' 的值 {value} 超出范围 - {message}")]
    OutOfRange {
        attribute: &'static str,
        value: f32,
        message: &'static str,
    },

    /// 未知的动画变体
    #[error("未知的动画变体 '{raw}'")]
    UnknownVariant { raw: String },
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 数值必须为正
    #[error("配置项 '{field}' 必须大于 0，实际为 {value}")]
    NotPositive { field: &'static str, value: f32 },

    /// 数值不能为负
    #[error("配置项 '{field}' 不能为负数，实际为 {value}")]
    Negative { field: &'static str, value: f32 },

    /// 比例必须在 0.0 - 1.0 之间
    #[error("配置项 '{field}' 必须在 0.0 - 1.0 之间，实际为 {value}")]
    FractionOutOfRange { field: &'static str, value: f32 },

    /// 贝塞尔控制点 x 超出 0.0 - 1.0
    #[error("缓动曲线控制点 x1 = {x1}, x2 = {x2} 必须在 0.0 - 1.0 之间")]
    InvalidEasing { x1: f32, x2: f32 },

    /// 未知预设名
    #[error("未知的配置预设 '{name}'")]
    UnknownProfile { name: String },
}
