//! # Diagnostic 模块
//!
//! 属性回退诊断。调度器从不失败：无效属性回退到默认值，
//! 并在这里留下一条记录，由宿主决定是否输出（通常是 debug 级别）。

use serde::{Deserialize, Serialize};

use crate::error::AttributeError;
use crate::target::TargetId;

/// 回退原因
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// 使用了默认值
    UsedDefault,
    /// 属性被忽略（例如非正数的固定延迟）
    Ignored,
}

/// 单条属性回退诊断
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveDiagnostic {
    /// 目标元素
    pub target: TargetId,
    /// 属性名
    pub attribute: &'static str,
    /// 原始值
    pub raw: String,
    /// 错误描述
    pub message: String,
    /// 处理方式
    pub reason: FallbackReason,
}

impl ResolveDiagnostic {
    pub(crate) fn new(
        target: TargetId,
        raw: &str,
        error: &AttributeError,
        reason: FallbackReason,
    ) -> Self {
        let attribute = match error {
            AttributeError::Empty { attribute }
            | AttributeError::NotANumber { attribute, .. }
            | AttributeError::OutOfRange { attribute, .. } => *attribute,
            AttributeError::UnknownVariant { .. } => crate::attribute::ATTR_VARIANT,
        };
        Self {
            target,
            attribute,
            raw: raw.to_string(),
            message: error.to_string(),
            reason,
        }
    }
}

impl std::fmt::Display for ResolveDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let action = match self.reason {
            FallbackReason::UsedDefault => "使用默认值",
            FallbackReason::Ignored => "已忽略",
        };
        write!(f, "{} {}: {}（{}）", self.target, self.attribute, self.message, action)
    }
}
