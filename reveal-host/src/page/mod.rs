//! # Page 模块
//!
//! 页面描述与滚动脚本（JSON）。
//!
//! 页面示例：
//! ```json
//! {
//!   "viewport": { "width": 1280, "height": 800 },
//!   "elements": [
//!     { "name": "hero", "top": 120, "height": 300, "attributes": { "data-anim": "fadeslide-up" } }
//!   ],
//!   "marquee": { "attributes": { "duration-per-item": "3" }, "item_count": 6 }
//! }
//! ```
//!
//! 脚本示例：
//! ```json
//! { "steps": [ { "at": 0.5, "action": { "scroll_to": { "y": 900, "over": 0.4 } } } ] }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use reveal_runtime::{ElementAttributes, ElementSnapshot, TargetId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 页面文件错误
#[derive(Error, Debug)]
pub enum PageError {
    /// 读取失败
    #[error("无法读取 {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON 解析失败
    #[error("无法解析 {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// 视口信息
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// 宽度（像素）
    pub width: f32,
    /// 高度（像素）
    pub height: f32,
    /// 初始滚动位置
    #[serde(default)]
    pub scroll_y: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            scroll_y: 0.0,
        }
    }
}

/// 页面元素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageElement {
    /// 显示名称
    #[serde(default)]
    pub name: String,
    /// 文档坐标中的顶边
    pub top: f32,
    /// 高度
    #[serde(default)]
    pub height: f32,
    /// 原始属性
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl PageElement {
    /// 是否带有入场动画标记
    pub fn is_reveal_target(&self) -> bool {
        ElementAttributes::from_map(&self.attributes).is_tagged()
    }
}

/// 跑马灯元素
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarqueeElement {
    /// 原始属性
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// 条目列表中的条目数；没有条目列表时为 `None`
    #[serde(default)]
    pub item_count: Option<usize>,
}

/// 页面文档
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageDocument {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub elements: Vec<PageElement>,
    #[serde(default)]
    pub marquee: Option<MarqueeElement>,
}

impl PageDocument {
    /// 从文件加载
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PageError> {
        load_json(path.as_ref())
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 带标记的元素及其 ID
    ///
    /// ID 是元素在文档中的下标。
    pub fn reveal_targets(&self) -> impl Iterator<Item = (TargetId, &PageElement)> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| element.is_reveal_target())
            .map(|(index, element)| (TargetId(index as u32), element))
    }

    /// 按当前滚动位置生成元素快照
    pub fn snapshots(&self, scroll_y: f32) -> Vec<ElementSnapshot> {
        self.reveal_targets()
            .map(|(id, element)| ElementSnapshot {
                id,
                rect_top: element.top - scroll_y,
                rect_bottom: element.top + element.height - scroll_y,
                attributes: ElementAttributes::from_map(&element.attributes),
            })
            .collect()
    }

    /// 按 ID 查找元素
    pub fn element(&self, id: TargetId) -> Option<&PageElement> {
        self.elements.get(id.value() as usize)
    }

    /// 元素显示名称，没有名称时用 ID
    pub fn display_name(&self, id: TargetId) -> String {
        match self.element(id) {
            Some(element) if !element.name.is_empty() => element.name.clone(),
            _ => id.to_string(),
        }
    }
}

/// 脚本动作
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollAction {
    /// 滚动到指定位置，`over` 秒内线性完成
    ScrollTo {
        y: f32,
        #[serde(default)]
        over: f32,
    },
    /// 改变视口宽度
    Resize { width: f32 },
    /// 什么都不做，只推进时间
    Wait,
}

/// 脚本步骤
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollStep {
    /// 开始时间（秒）
    pub at: f64,
    pub action: ScrollAction,
}

/// 滚动脚本
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollScript {
    #[serde(default)]
    pub steps: Vec<ScrollStep>,
}

impl ScrollScript {
    /// 从文件加载
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PageError> {
        load_json(path.as_ref())
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 按开始时间排序后的步骤（稳定排序）
    pub fn ordered_steps(&self) -> Vec<ScrollStep> {
        let mut steps = self.steps.clone();
        steps.sort_by(|a, b| a.at.total_cmp(&b.at));
        steps
    }

    /// 脚本结束时间
    pub fn end_time(&self) -> f64 {
        self.steps
            .iter()
            .map(|step| match step.action {
                ScrollAction::ScrollTo { over, .. } => step.at + over.max(0.0) as f64,
                _ => step.at,
            })
            .fold(0.0, f64::max)
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, PageError> {
    let content = fs::read_to_string(path).map_err(|source| PageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| PageError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "viewport": { "width": 1280, "height": 800, "scroll_y": 100 },
        "elements": [
            { "name": "hero", "top": 0, "height": 50, "attributes": { "data-anim": "fadeslide-up" } },
            { "name": "plain", "top": 400, "height": 100 },
            { "top": 900, "height": 100, "attributes": { "data-anim": "fade", "data-anim-delay": "500" } }
        ]
    }"#;

    #[test]
    fn test_parse_page() {
        let page = PageDocument::from_json(PAGE).unwrap();
        assert_eq!(page.viewport.width, 1280.0);
        assert_eq!(page.elements.len(), 3);
        assert!(page.marquee.is_none());

        let ids: Vec<_> = page.reveal_targets().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![TargetId(0), TargetId(2)]);
    }

    #[test]
    fn test_snapshots_relative_to_scroll() {
        let page = PageDocument::from_json(PAGE).unwrap();
        let snapshots = page.snapshots(page.viewport.scroll_y);

        assert_eq!(snapshots[0].rect_top, -100.0);
        assert_eq!(snapshots[0].rect_bottom, -50.0);
        assert!(snapshots[0].is_above_viewport());
        assert_eq!(snapshots[1].attributes.delay.as_deref(), Some("500"));
    }

    #[test]
    fn test_display_name() {
        let page = PageDocument::from_json(PAGE).unwrap();
        assert_eq!(page.display_name(TargetId(0)), "hero");
        assert_eq!(page.display_name(TargetId(2)), "Target(2)");
    }

    #[test]
    fn test_parse_script() {
        let script = ScrollScript::from_json(
            r#"{ "steps": [
                { "at": 1.0, "action": "wait" },
                { "at": 0.0, "action": { "scroll_to": { "y": 500, "over": 0.5 } } },
                { "at": 2.0, "action": { "resize": { "width": 500 } } }
            ] }"#,
        )
        .unwrap();

        let steps = script.ordered_steps();
        assert_eq!(steps[0].action, ScrollAction::ScrollTo { y: 500.0, over: 0.5 });
        assert_eq!(steps[1].action, ScrollAction::Wait);
        assert_eq!(script.end_time(), 2.0);
    }

    #[test]
    fn test_load_missing_file() {
        let err = PageDocument::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, PageError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.json");
        fs::write(&path, "{ not json").unwrap();

        let err = PageDocument::load(&path).unwrap_err();
        assert!(matches!(err, PageError::Json { .. }));
    }
}
