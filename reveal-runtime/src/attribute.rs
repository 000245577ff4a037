//! # Attribute 模块
//!
//! 元素静态属性的读取与数值解析。
//!
//! ## 属性列表
//!
//! | 属性 | 含义 | 单位推断 |
//! |---|---|---|
//! | `data-anim` | 动画变体 | 否 |
//! | `data-anim-duration` | 时长 | 是 |
//! | `data-anim-delay` | 固定延迟 | 是 |
//! | `data-anim-group-delay` | 组内错峰步长 | 是 |
//!
//! ## 单位推断规则
//!
//! 整个属性值是一个完整数字且大于 [`MILLISECOND_THRESHOLD`] 时视为毫秒，
//! 除以 1000 转为秒。带单位后缀的值（`"800ms"`、`"0.8s"`）不参与推断，
//! 只取数字前缀。已有的页面配置依赖这条规则，必须原样保留。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AttributeError;

/// 动画变体属性
pub const ATTR_VARIANT: &str = "data-anim";
/// 时长属性
pub const ATTR_DURATION: &str = "data-anim-duration";
/// 固定延迟属性
pub const ATTR_DELAY: &str = "data-anim-delay";
/// 组内错峰步长属性
pub const ATTR_GROUP_DELAY: &str = "data-anim-group-delay";

/// 大于此值的数值按毫秒处理
pub const MILLISECOND_THRESHOLD: f32 = 50.0;

/// 元素上与入场动画相关的原始属性
///
/// 只保存字符串原值，解释工作交给 [`crate::target`]。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementAttributes {
    /// `data-anim`
    pub variant: Option<String>,
    /// `data-anim-duration`
    pub duration: Option<String>,
    /// `data-anim-delay`
    pub delay: Option<String>,
    /// `data-anim-group-delay`
    pub group_delay: Option<String>,
}

impl ElementAttributes {
    /// 从任意属性表中提取相关属性
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self {
            variant: map.get(ATTR_VARIANT).cloned(),
            duration: map.get(ATTR_DURATION).cloned(),
            delay: map.get(ATTR_DELAY).cloned(),
            group_delay: map.get(ATTR_GROUP_DELAY).cloned(),
        }
    }

    /// 是否带有入场动画标记
    pub fn is_tagged(&self) -> bool {
        self.variant.is_some()
    }
}

/// 宽松解析数字前缀
///
/// 跳过前导空白，读取可选符号、整数部分、小数部分与指数部分，
/// 忽略其后的任何文本（`"0.8s"` → `0.8`）。没有任何数字时返回 `None`。
pub fn parse_float_prefix(raw: &str) -> Option<f32> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // 指数部分必须完整，否则只取尾数
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f32>().ok().filter(|v| v.is_finite())
}

/// 按完整数字字面量解析整个属性值
///
/// 与 [`parse_float_prefix`] 不同，除首尾空白外不允许任何多余文本。
/// 支持十进制（含指数）、`0x`/`0o`/`0b` 前缀整数与 `Infinity`，
/// 空白串视为 `0`。无法解析时返回 `None`。
pub fn parse_numeric_literal(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return None;
        }
        return u64::from_str_radix(digits, radix).ok().map(|v| v as f64);
    }

    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    if unsigned == "Infinity" {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    // 标准库还接受 "inf" / "NaN"，这里只放行数字、小数点与指数
    let starts_numeric = unsigned
        .bytes()
        .next()
        .is_some_and(|b| b.is_ascii_digit() || b == b'.');
    let numeric_chars = unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !starts_numeric || !numeric_chars {
        return None;
    }
    s.parse::<f64>().ok()
}

/// 解析时间类属性（秒或毫秒）
///
/// 数值取自 [`parse_float_prefix`]；只有整个值是完整数字（见 [`parse_numeric_literal`]）
/// 且大于 [`MILLISECOND_THRESHOLD`] 时才按毫秒换算为秒。
/// `"1200"` 与 `"1.2"` 都得到 `1.2`，`"40"` 保持 `40` 秒，
/// 带后缀的 `"800ms"` 不换算，得到 `800` 秒。
///
/// 注意：刻意设置的 60 秒会被误判为 60 毫秒（0.06 秒），这是既有配置契约的一部分。
pub fn parse_duration_attribute(raw: &str) -> Option<f32> {
    let value = parse_float_prefix(raw)?;
    let is_millis = parse_numeric_literal(raw)
        .is_some_and(|whole| whole > f64::from(MILLISECOND_THRESHOLD));
    if is_millis {
        Some(value / 1000.0)
    } else {
        Some(value)
    }
}

/// 解析时间类属性，失败时返回具体原因
pub(crate) fn read_seconds(attribute: &'static str, raw: &str) -> Result<f32, AttributeError> {
    if raw.trim().is_empty() {
        return Err(AttributeError::Empty { attribute });
    }
    parse_duration_attribute(raw).ok_or_else(|| AttributeError::NotANumber {
        attribute,
        raw: raw.to_string(),
    })
}
