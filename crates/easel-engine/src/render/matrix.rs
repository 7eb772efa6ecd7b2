use glam::{Mat4, Vec3};

/// Deepest model-view stack a sketch can build.
pub const MAX_MATRIX_DEPTH: usize = 32;

/// Model-view matrix stack.
///
/// The top of the stack is the current transform. Pushing duplicates it;
/// popping the last entry is ignored.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    stack: Vec<Mat4>,
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixStack {
    pub fn new() -> Self {
        Self {
            stack: vec![Mat4::IDENTITY],
        }
    }

    #[inline]
    pub fn current(&self) -> Mat4 {
        self.stack.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn top_mut(&mut self) -> &mut Mat4 {
        if self.stack.is_empty() {
            self.stack.push(Mat4::IDENTITY);
        }
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Resets the current transform (the saved entries below are kept).
    pub fn load_identity(&mut self) {
        *self.top_mut() = Mat4::IDENTITY;
    }

    /// Swaps in `m` as the current transform and returns the old one.
    pub fn replace(&mut self, m: Mat4) -> Mat4 {
        std::mem::replace(self.top_mut(), m)
    }

    /// Drops every saved entry and resets to identity.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.stack.push(Mat4::IDENTITY);
    }

    /// Returns `false` when the stack is full.
    pub fn push(&mut self) -> bool {
        if self.stack.len() >= MAX_MATRIX_DEPTH {
            return false;
        }
        let top = self.current();
        self.stack.push(top);
        true
    }

    /// Returns `false` on an unbalanced pop.
    pub fn pop(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        true
    }

    pub fn translate(&mut self, v: Vec3) {
        let top = self.top_mut();
        *top *= Mat4::from_translation(v);
    }

    /// Rotates about `axis` (need not be normalized); a zero axis is ignored.
    pub fn rotate(&mut self, radians: f32, axis: Vec3) {
        let Some(axis) = axis.try_normalize() else {
            return;
        };
        let top = self.top_mut();
        *top *= Mat4::from_axis_angle(axis, radians);
    }

    pub fn scale(&mut self, v: Vec3) {
        let top = self.top_mut();
        *top *= Mat4::from_scale(v);
    }

    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.current().transform_point3(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn push_pop_restores_transform() {
        let mut m = MatrixStack::new();
        m.translate(Vec3::new(10.0, 0.0, 0.0));
        assert!(m.push());
        m.translate(Vec3::new(0.0, 5.0, 0.0));
        assert!(close(m.transform_point(Vec3::ZERO), Vec3::new(10.0, 5.0, 0.0)));
        assert!(m.pop());
        assert!(close(m.transform_point(Vec3::ZERO), Vec3::new(10.0, 0.0, 0.0)));
    }

    #[test]
    fn unbalanced_pop_is_ignored() {
        let mut m = MatrixStack::new();
        assert!(!m.pop());
        assert_eq!(m.depth(), 1);
    }

    #[test]
    fn operations_compose_in_call_order() {
        let mut m = MatrixStack::new();
        m.translate(Vec3::new(100.0, 100.0, 0.0));
        m.rotate(std::f32::consts::FRAC_PI_2, Vec3::Z);
        // Local +X ends up along world +Y, offset by the translation.
        let p = m.transform_point(Vec3::new(10.0, 0.0, 0.0));
        assert!(close(p, Vec3::new(100.0, 110.0, 0.0)));
    }

    #[test]
    fn replace_swaps_only_the_top() {
        let mut m = MatrixStack::new();
        m.translate(Vec3::new(3.0, 0.0, 0.0));
        let saved = m.replace(Mat4::IDENTITY);
        assert!(close(m.transform_point(Vec3::ZERO), Vec3::ZERO));
        m.replace(saved);
        assert!(close(m.transform_point(Vec3::ZERO), Vec3::new(3.0, 0.0, 0.0)));
        assert_eq!(m.depth(), 1);
    }

    #[test]
    fn depth_is_bounded() {
        let mut m = MatrixStack::new();
        for _ in 1..MAX_MATRIX_DEPTH {
            assert!(m.push());
        }
        assert!(!m.push());
    }
}
