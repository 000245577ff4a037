//! # Variant 模块
//!
//! 入场动画变体：决定起始状态的位移方向。

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AttributeError;

/// 入场动画变体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevealVariant {
    /// 淡入并向上滑动（`fadeslide-up`）
    SlideUp,
    /// 淡入并从左侧滑入（`fadeslide-in-left`）
    SlideFromLeft,
    /// 淡入并从右侧滑入（`fadeslide-in-right`）
    SlideFromRight,
    /// 按版面方向滑入（`fadeslide-in`），当前策略不施加水平位移
    DirectionalSlide,
    /// 仅淡入（`fade`）
    #[default]
    FadeOnly,
}

impl RevealVariant {
    /// 所有变体
    pub const ALL: [RevealVariant; 5] = [
        RevealVariant::SlideUp,
        RevealVariant::SlideFromLeft,
        RevealVariant::SlideFromRight,
        RevealVariant::DirectionalSlide,
        RevealVariant::FadeOnly,
    ];

    /// 页面属性中使用的标签名
    pub fn tag(&self) -> &'static str {
        match self {
            RevealVariant::SlideUp => "fadeslide-up",
            RevealVariant::SlideFromLeft => "fadeslide-in-left",
            RevealVariant::SlideFromRight => "fadeslide-in-right",
            RevealVariant::DirectionalSlide => "fadeslide-in",
            RevealVariant::FadeOnly => "fade",
        }
    }

    /// 起始位移 `(x, y)`
    ///
    /// # 参数
    /// - `distance`: 当前视口对应的过渡距离（像素）
    pub fn start_offset(&self, distance: f32) -> (f32, f32) {
        match self {
            RevealVariant::SlideUp => (0.0, distance),
            RevealVariant::SlideFromLeft => (-distance, 0.0),
            RevealVariant::SlideFromRight => (distance, 0.0),
            RevealVariant::DirectionalSlide | RevealVariant::FadeOnly => (0.0, 0.0),
        }
    }
}

impl FromStr for RevealVariant {
    type Err = AttributeError;

    /// 匹配时去除首尾空白并忽略 ASCII 大小写
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.tag().eq_ignore_ascii_case(tag))
            .ok_or_else(|| AttributeError::UnknownVariant { raw: s.to_string() })
    }
}

impl std::fmt::Display for RevealVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}
