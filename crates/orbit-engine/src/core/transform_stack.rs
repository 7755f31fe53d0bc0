// core/transform_stack.rs
//
// Save/restore stack for hierarchical model-view composition.
//
// Usage:
//   stack.push();
//   stack.translate(offset);
//   draw(stack.current());
//   stack.pop()?;

use std::fmt;

use glam::{Mat4, Vec3};

/// Mismatched push/pop pairing detected by the [`TransformStack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformStackError {
    /// `pop()` was called with nothing saved.
    Underflow,
    /// The frame ended with saved transforms still on the stack.
    Unbalanced { remaining: usize },
}

impl fmt::Display for TransformStackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Underflow => write!(f, "pop on an empty transform stack"),
            Self::Unbalanced { remaining } => {
                write!(f, "frame ended with {remaining} unpopped transform(s)")
            }
        }
    }
}

impl std::error::Error for TransformStackError {}

/// LIFO stack of model-view matrices.
///
/// Operations post-multiply the current transform, so the most recently
/// applied operation acts first on vertex positions (parent-relative placement).
#[derive(Debug, Clone)]
pub struct TransformStack {
    current: Mat4,
    saved: Vec<Mat4>,
}

impl TransformStack {
    pub fn new(base: Mat4) -> Self {
        Self {
            current: base,
            saved: Vec::with_capacity(8),
        }
    }

    /// The active transform.
    pub fn current(&self) -> Mat4 {
        self.current
    }

    /// Number of saved transforms.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    /// Save a copy of the current transform.
    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restore the most recently saved transform.
    pub fn pop(&mut self) -> Result<(), TransformStackError> {
        self.current = self.saved.pop().ok_or(TransformStackError::Underflow)?;
        Ok(())
    }

    /// Run `f` between a push and its matching pop.
    pub fn scoped<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, TransformStackError>,
    ) -> Result<R, TransformStackError> {
        self.push();
        let result = f(self);
        self.pop()?;
        result
    }

    /// Start a new frame from `base`. Fails if the previous frame left
    /// transforms behind; the stack is cleared either way.
    pub fn begin(&mut self, base: Mat4) -> Result<(), TransformStackError> {
        let remaining = self.saved.len();
        self.saved.clear();
        self.current = base;
        if remaining > 0 {
            return Err(TransformStackError::Unbalanced { remaining });
        }
        Ok(())
    }

    /// Check that every push of the frame was matched by a pop.
    pub fn finish(&self) -> Result<(), TransformStackError> {
        match self.saved.len() {
            0 => Ok(()),
            remaining => Err(TransformStackError::Unbalanced { remaining }),
        }
    }

    pub fn multiply(&mut self, m: Mat4) {
        self.current *= m;
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.multiply(Mat4::from_translation(offset));
    }

    pub fn rotate_x(&mut self, angle: f32) {
        self.multiply(Mat4::from_rotation_x(angle));
    }

    pub fn rotate_y(&mut self, angle: f32) {
        self.multiply(Mat4::from_rotation_y(angle));
    }

    pub fn rotate_z(&mut self, angle: f32) {
        self.multiply(Mat4::from_rotation_z(angle));
    }

    pub fn scale(&mut self, factors: Vec3) {
        self.multiply(Mat4::from_scale(factors));
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}
