//! Component Configuration
//!
//! [`Options`] is the flat configuration record every component is built
//! with. Recognised keys are typed; anything else is kept verbatim in
//! [`Options::extra`] and passed through untouched.
//!
//! ```rust,ignore
//! let options = Options::from_json(r#"{"shortName": "hero", "position": [0, 2, 0], "speed": 3}"#)?;
//! assert_eq!(options.short_name(), "hero");
//! assert_eq!(options.extra["speed"], 3);
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::Result;
use crate::resources::{UniformMap, UniformValue};

pub const DEFAULT_NAME_PREFIX: &str = "widget";
pub const DEFAULT_SHORT_NAME: &str = "base";

/// Flat configuration record. Every field is optional so a record can act as
/// a patch for [`merge`](Self::merge).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    // === Identity ===
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_prefix: Option<String>,

    // === Initial transform ===
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec3>,

    // === Gallery layout ===
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_depth: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<f32>,

    // === Mesh placement ===
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f32>,

    // === Pass-through visual parameters ===
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defines: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uniforms: Option<UniformMap>,

    /// Unrecognised keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Options {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON record.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    // ========================================================================
    // Builder helpers
    // ========================================================================

    #[must_use]
    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    #[must_use]
    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = Some(rotation);
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = Some(scale);
        self
    }

    #[must_use]
    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }

    #[must_use]
    pub fn with_depth_range(mut self, min_depth: f32, max_depth: f32) -> Self {
        self.min_depth = Some(min_depth);
        self.max_depth = Some(max_depth);
        self
    }

    #[must_use]
    pub fn with_uniform(mut self, key: impl Into<String>, value: impl Into<UniformValue>) -> Self {
        self.uniforms
            .get_or_insert_with(UniformMap::default)
            .insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    // ========================================================================
    // Merge
    // ========================================================================

    /// Overlays every key present in `patch` onto `self`.
    pub fn merge(&mut self, patch: &Options) {
        fn overlay<T: Clone>(dst: &mut Option<T>, src: &Option<T>) {
            if let Some(v) = src {
                *dst = Some(v.clone());
            }
        }

        overlay(&mut self.short_name, &patch.short_name);
        overlay(&mut self.name_prefix, &patch.name_prefix);
        overlay(&mut self.position, &patch.position);
        overlay(&mut self.rotation, &patch.rotation);
        overlay(&mut self.scale, &patch.scale);
        overlay(&mut self.total, &patch.total);
        overlay(&mut self.min_depth, &patch.min_depth);
        overlay(&mut self.max_depth, &patch.max_depth);
        overlay(&mut self.z, &patch.z);
        overlay(&mut self.angle, &patch.angle);
        overlay(&mut self.background, &patch.background);
        overlay(&mut self.defines, &patch.defines);
        overlay(&mut self.uniforms, &patch.uniforms);

        for (key, value) in &patch.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }

    /// `defaults` with `self` merged on top.
    #[must_use]
    pub fn over(&self, mut defaults: Options) -> Options {
        defaults.merge(self);
        defaults
    }

    // ========================================================================
    // Resolved accessors
    // ========================================================================

    #[must_use]
    pub fn short_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(DEFAULT_SHORT_NAME)
    }

    #[must_use]
    pub fn name_prefix(&self) -> &str {
        self.name_prefix.as_deref().unwrap_or(DEFAULT_NAME_PREFIX)
    }

    /// `<namePrefix>-<shortName>`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}-{}", self.name_prefix(), self.short_name())
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position.unwrap_or(Vec3::ZERO)
    }

    #[must_use]
    pub fn rotation(&self) -> Vec3 {
        self.rotation.unwrap_or(Vec3::ZERO)
    }

    #[must_use]
    pub fn scale(&self) -> Vec3 {
        self.scale.unwrap_or(Vec3::ONE)
    }
}

/// Per-kind default records.
pub mod defaults {
    use glam::Vec3;

    use super::{DEFAULT_NAME_PREFIX, DEFAULT_SHORT_NAME, Options};

    pub const GALLERY_TOTAL: usize = 8;
    pub const GALLERY_MIN_DEPTH: f32 = 0.0;
    pub const GALLERY_MAX_DEPTH: f32 = 1000.0;

    #[must_use]
    pub fn base() -> Options {
        Options {
            short_name: Some(DEFAULT_SHORT_NAME.into()),
            name_prefix: Some(DEFAULT_NAME_PREFIX.into()),
            position: Some(Vec3::ZERO),
            rotation: Some(Vec3::ZERO),
            scale: Some(Vec3::ONE),
            ..Options::default()
        }
    }

    #[must_use]
    pub fn group() -> Options {
        base().with_short_name("group")
    }

    #[must_use]
    pub fn mesh() -> Options {
        base().with_short_name("mesh")
    }

    #[must_use]
    pub fn gallery() -> Options {
        group()
            .with_short_name("gallery")
            .with_total(GALLERY_TOTAL)
            .with_depth_range(GALLERY_MIN_DEPTH, GALLERY_MAX_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overlays_only_present_keys() {
        let mut options = defaults::base().with_position(Vec3::new(1.0, 2.0, 3.0));
        let patch = Options::new().with_scale(Vec3::splat(2.0)).with_extra("speed", 4);

        options.merge(&patch);

        assert_eq!(options.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(options.scale(), Vec3::splat(2.0));
        assert_eq!(options.extra["speed"], 4);
    }

    #[test]
    fn json_keeps_unrecognised_keys() {
        let options =
            Options::from_json(r#"{"shortName": "hero", "position": [0, 2, 0], "speed": 3}"#)
                .unwrap();

        assert_eq!(options.short_name(), "hero");
        assert_eq!(options.position(), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(options.extra.get("speed"), Some(&Value::from(3)));
        assert!(!options.extra.contains_key("shortName"));
    }

    #[test]
    fn name_joins_prefix_and_short_name() {
        let options = Options::new().with_name_prefix("hud").with_short_name("clock");
        assert_eq!(options.name(), "hud-clock");
        assert_eq!(Options::new().name(), "widget-base");
    }
}
