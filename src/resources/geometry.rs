use crate::resources::Dispose;

/// Shape descriptor for a mesh. Vertex generation belongs to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryShape {
    Plane { width: f32, height: f32 },
}

#[derive(Debug, Clone)]
pub struct Geometry {
    pub shape: GeometryShape,
    disposed: bool,
}

impl Geometry {
    #[must_use]
    pub fn new(shape: GeometryShape) -> Self {
        Self {
            shape,
            disposed: false,
        }
    }

    #[must_use]
    pub fn plane(width: f32, height: f32) -> Self {
        Self::new(GeometryShape::Plane { width, height })
    }

    #[inline]
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Dispose for Geometry {
    fn dispose(&mut self) {
        self.disposed = true;
    }
}
