//! # Element 模块
//!
//! 页面元素的可动画状态：位移与不透明度。

use std::cell::RefCell;

use reveal_runtime::TweenState;

use super::traits::Animatable;

/// 属性：水平位移
pub const PROP_X: &str = "x";
/// 属性：垂直位移
pub const PROP_Y: &str = "y";
/// 属性：不透明度
pub const PROP_OPACITY: &str = "opacity";

/// 可动画元素
///
/// 初始状态与页面样式一致：带标记的元素在入场前不可见。
#[derive(Debug)]
pub struct AnimatedElement {
    state: RefCell<TweenState>,
}

impl AnimatedElement {
    /// 创建新的元素
    pub fn new(initial: TweenState) -> Self {
        Self {
            state: RefCell::new(initial),
        }
    }

    /// 尚未入场的元素（不透明度为 0、无位移）
    pub fn hidden() -> Self {
        Self::new(TweenState::hidden(0.0, 0.0))
    }

    /// 当前状态
    pub fn state(&self) -> TweenState {
        *self.state.borrow()
    }
}

impl Animatable for AnimatedElement {
    fn get_property(&self, property_id: &str) -> Option<f32> {
        let state = self.state.borrow();
        match property_id {
            PROP_X => Some(state.x),
            PROP_Y => Some(state.y),
            PROP_OPACITY => Some(state.opacity),
            _ => None,
        }
    }

    fn set_property(&self, property_id: &str, value: f32) -> bool {
        let mut state = self.state.borrow_mut();
        match property_id {
            PROP_X => state.x = value,
            PROP_Y => state.y = value,
            PROP_OPACITY => state.opacity = value.clamp(0.0, 1.0),
            _ => return false,
        }
        true
    }

    fn property_list(&self) -> &'static [&'static str] {
        &[PROP_X, PROP_Y, PROP_OPACITY]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_element() {
        let element = AnimatedElement::hidden();
        assert_eq!(element.state().opacity, 0.0);
        assert_eq!(element.get_property(PROP_X), Some(0.0));
    }

    #[test]
    fn test_set_property() {
        let element = AnimatedElement::hidden();

        assert!(element.set_property(PROP_Y, 40.0));
        assert!(element.set_property(PROP_OPACITY, 1.5));
        assert!(!element.set_property("scale", 2.0));

        let state = element.state();
        assert_eq!(state.y, 40.0);
        // 不透明度被限制在 0.0 - 1.0
        assert_eq!(state.opacity, 1.0);
        assert_eq!(element.property_list(), &["x", "y", "opacity"]);
    }
}
