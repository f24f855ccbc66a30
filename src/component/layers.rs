//! Named transform contributions.

use glam::Vec3;

/// Name of the layer seeded from the component's own configuration.
pub const ORIGINAL: &str = "original";

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub value: Vec3,
}

/// Ordered, named collection of `Vec3` contributions.
///
/// Names are unique: pushing an existing name updates that layer in place.
/// Position and rotation stacks are reduced with [`sum`](Self::sum), scale
/// stacks with [`multiply`](Self::multiply).
#[derive(Debug, Clone)]
pub struct ValueLayerStack {
    layers: Vec<Layer>,
}

impl ValueLayerStack {
    /// Creates a stack holding only the [`ORIGINAL`] layer.
    #[must_use]
    pub fn new(original: Vec3) -> Self {
        Self {
            layers: vec![Layer {
                name: ORIGINAL.to_owned(),
                value: original,
            }],
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Always false: the original layer cannot be removed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Appends a layer, or updates it in place if the name already exists.
    pub fn push(&mut self, name: impl Into<String>, value: Vec3) {
        let name = name.into();
        if !self.set(&name, value) {
            self.layers.push(Layer { name, value });
        }
    }

    /// Replaces the value of an existing layer. Returns `false` if unknown.
    pub fn set(&mut self, name: &str, value: Vec3) -> bool {
        match self.layers.iter_mut().find(|l| l.name == name) {
            Some(layer) => {
                layer.value = value;
                true
            }
            None => false,
        }
    }

    /// Removes a layer. The original layer is never removed.
    pub fn remove(&mut self, name: &str) -> Option<Vec3> {
        if name == ORIGINAL {
            return None;
        }
        let index = self.layers.iter().position(|l| l.name == name)?;
        Some(self.layers.remove(index).value)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Vec3> {
        self.layers.iter().find(|l| l.name == name).map(|l| l.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    /// Componentwise sum of every layer.
    #[must_use]
    pub fn sum(&self) -> Vec3 {
        self.layers.iter().fold(Vec3::ZERO, |acc, l| acc + l.value)
    }

    /// Componentwise product of every layer.
    #[must_use]
    pub fn multiply(&self) -> Vec3 {
        self.layers.iter().fold(Vec3::ONE, |acc, l| acc * l.value)
    }
}

impl Default for ValueLayerStack {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}
