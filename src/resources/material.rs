use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Map, Value};

use crate::resources::Dispose;
use crate::resources::uniforms::{UniformMap, apply_known};

static NEXT_MATERIAL_ID: AtomicU64 = AtomicU64::new(1);

/// CPU-side description of a shader material owned by a mesh component.
///
/// The rendering engine compiles it; the widget tree only writes uniforms and
/// releases it.
#[derive(Debug, Clone)]
pub struct Material {
    pub id: u64,
    pub uniforms: UniformMap,
    pub defines: Map<String, Value>,
    /// Bumped on every uniform write so the renderer can detect changes.
    pub version: u64,
    disposed: bool,
}

impl Material {
    #[must_use]
    pub fn new(uniforms: UniformMap, defines: Map<String, Value>) -> Self {
        Self {
            id: NEXT_MATERIAL_ID.fetch_add(1, Ordering::Relaxed),
            uniforms,
            defines,
            version: 0,
            disposed: false,
        }
    }

    /// Writes the values of every uniform this material already declares.
    pub fn update_uniforms(&mut self, values: &UniformMap) {
        if self.disposed {
            return;
        }
        if apply_known(&mut self.uniforms, values) > 0 {
            self.version += 1;
        }
    }

    #[inline]
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(UniformMap::default(), Map::new())
    }
}

impl Dispose for Material {
    fn dispose(&mut self) {
        self.uniforms.clear();
        self.disposed = true;
    }
}
