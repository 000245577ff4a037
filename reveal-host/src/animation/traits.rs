//! # Traits 模块
//!
//! 可动画对象接口与属性键。

use reveal_runtime::TargetId;

/// 属性键
///
/// `TargetId + property_id` 唯一标识一个可动画属性。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyKey {
    /// 目标元素
    pub target: TargetId,
    /// 属性名称
    pub property_id: &'static str,
}

impl PropertyKey {
    /// 创建属性键
    pub fn new(target: TargetId, property_id: &'static str) -> Self {
        Self {
            target,
            property_id,
        }
    }
}

impl std::fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.target, self.property_id)
    }
}

/// 可动画对象接口
///
/// 对象通过实现此 trait 声明自己有哪些属性可以被动画，
/// 动画系统每帧直接写入属性值。
pub trait Animatable: 'static {
    /// 获取属性的当前值
    ///
    /// # 返回
    /// - `Some(value)`: 属性存在，返回当前值
    /// - `None`: 属性不存在
    fn get_property(&self, property_id: &str) -> Option<f32>;

    /// 设置属性的新值
    ///
    /// # 返回
    /// - `true`: 设置成功
    /// - `false`: 属性不存在
    fn set_property(&self, property_id: &str, value: f32) -> bool;

    /// 获取所有可动画属性的列表
    fn property_list(&self) -> &'static [&'static str];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_key() {
        let key1 = PropertyKey::new(TargetId(1), "opacity");
        let key2 = PropertyKey::new(TargetId(1), "opacity");
        let key3 = PropertyKey::new(TargetId(1), "x");

        assert_eq!(key1, key2);
        assert_ne!(key1, key3);
        assert_eq!(key1.to_string(), "Target(1):opacity");
    }
}
