//! Uniform values passed through to materials and composers.

use glam::{Vec2, Vec3, Vec4};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::assets::Texture;

/// A single uniform value.
///
/// Deserialised untagged so a plain JSON record such as
/// `{"uOpacity": 0.5, "uTint": [1, 0, 0]}` maps naturally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UniformValue {
    Bool(bool),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Texture(Texture),
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for UniformValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Vec2> for UniformValue {
    fn from(v: Vec2) -> Self {
        Self::Vec2(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<Vec4> for UniformValue {
    fn from(v: Vec4) -> Self {
        Self::Vec4(v)
    }
}

impl From<Texture> for UniformValue {
    fn from(v: Texture) -> Self {
        Self::Texture(v)
    }
}

pub type UniformMap = FxHashMap<String, UniformValue>;

/// Overwrites every key of `target` that also appears in `values`.
///
/// Keys unknown to `target` are ignored: a material only accepts uniforms it
/// declared when it was built.
pub fn apply_known(target: &mut UniformMap, values: &UniformMap) -> usize {
    let mut written = 0;
    for (key, value) in values {
        if let Some(slot) = target.get_mut(key) {
            slot.clone_from(value);
            written += 1;
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_known_skips_undeclared_keys() {
        let mut target = UniformMap::default();
        target.insert("uTime".into(), 0.0.into());

        let mut values = UniformMap::default();
        values.insert("uTime".into(), 2.5.into());
        values.insert("uOther".into(), true.into());

        assert_eq!(apply_known(&mut target, &values), 1);
        assert_eq!(target.len(), 1);
        assert_eq!(target["uTime"], UniformValue::Float(2.5));
    }
}
