//! # Target 模块
//!
//! 入场动画目标：初始化时从页面元素解析一次，之后不再重建。

use serde::{Deserialize, Serialize};

use crate::attribute::{ATTR_DELAY, ATTR_DURATION, ATTR_GROUP_DELAY, ElementAttributes, read_seconds};
use crate::config::RevealConfig;
use crate::diagnostic::{FallbackReason, ResolveDiagnostic};
use crate::error::AttributeError;
use crate::variant::RevealVariant;

/// 目标唯一标识符
///
/// 由宿主在扫描页面时分配。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u32);

impl TargetId {
    /// 获取内部 ID 值
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Target({})", self.0)
    }
}

/// 初始化时元素的快照
///
/// `rect_top` / `rect_bottom` 是相对视口顶部的坐标，负数表示在视口上方。
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSnapshot {
    pub id: TargetId,
    pub rect_top: f32,
    pub rect_bottom: f32,
    pub attributes: ElementAttributes,
}

impl ElementSnapshot {
    /// 元素是否已完全位于视口上方
    pub fn is_above_viewport(&self) -> bool {
        self.rect_bottom < 0.0
    }
}

/// 入场动画目标
#[derive(Debug, Clone, PartialEq)]
pub struct RevealTarget {
    /// 目标 ID
    pub id: TargetId,
    /// 动画变体
    pub variant: RevealVariant,
    /// 时长（秒）
    pub duration: f32,
    /// 组内步长（秒）
    pub group_delay_step: f32,
    /// 固定延迟（秒），存在时不参与分组
    pub explicit_delay: Option<f32>,
    /// 是否已派发（只会从 false 变为 true）
    has_fired: bool,
}

impl RevealTarget {
    /// 从元素属性解析目标
    ///
    /// 无效属性回退到 `config` 中的默认值，每次回退向 `diagnostics` 追加一条记录。
    pub fn resolve(
        id: TargetId,
        attributes: &ElementAttributes,
        config: &RevealConfig,
        diagnostics: &mut Vec<ResolveDiagnostic>,
    ) -> Self {
        let variant = match attributes.variant.as_deref() {
            Some(raw) => raw.parse().unwrap_or_else(|e: AttributeError| {
                diagnostics.push(ResolveDiagnostic::new(id, raw, &e, FallbackReason::UsedDefault));
                RevealVariant::FadeOnly
            }),
            None => RevealVariant::FadeOnly,
        };

        let duration = resolve_seconds(
            id,
            ATTR_DURATION,
            attributes.duration.as_deref(),
            |v| v > 0.0,
            "时长必须大于 0",
            FallbackReason::UsedDefault,
            diagnostics,
        )
        .unwrap_or(config.default_duration);

        let group_delay_step = resolve_seconds(
            id,
            ATTR_GROUP_DELAY,
            attributes.group_delay.as_deref(),
            |v| v >= 0.0,
            "步长不能为负数",
            FallbackReason::UsedDefault,
            diagnostics,
        )
        .unwrap_or(config.default_group_delay_step);

        let explicit_delay = resolve_seconds(
            id,
            ATTR_DELAY,
            attributes.delay.as_deref(),
            |v| v > 0.0,
            "固定延迟必须大于 0",
            FallbackReason::Ignored,
            diagnostics,
        );

        Self {
            id,
            variant,
            duration,
            group_delay_step,
            explicit_delay,
            has_fired: false,
        }
    }

    /// 是否已派发
    pub fn has_fired(&self) -> bool {
        self.has_fired
    }

    /// 标记为已派发
    pub(crate) fn mark_fired(&mut self) {
        self.has_fired = true;
    }
}

/// 解析一个时间类属性，失败或不满足约束时记录诊断并返回 `None`
fn resolve_seconds(
    id: TargetId,
    attribute: &'static str,
    raw: Option<&str>,
    accept: impl Fn(f32) -> bool,
    constraint: &'static str,
    reason: FallbackReason,
    diagnostics: &mut Vec<ResolveDiagnostic>,
) -> Option<f32> {
    let raw = raw?;
    let result = read_seconds(attribute, raw).and_then(|value| {
        if accept(value) {
            Ok(value)
        } else {
            Err(AttributeError::OutOfRange {
                attribute,
                value,
                message: constraint,
            })
        }
    });

    match result {
        Ok(value) => Some(value),
        Err(e) => {
            diagnostics.push(ResolveDiagnostic::new(id, raw, &e, reason));
            None
        }
    }
}
