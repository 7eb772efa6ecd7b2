use crate::coords::{Canvas, Rect};
use crate::paint::{Color, ColorSpace, Rgba};

use super::backend::{BlendMode, Projection};
use super::shading::{Fog, Light};

/// Anchor used by `rect` to interpret its position.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum RectMode {
    /// `(x, y)` is the top-left corner.
    #[default]
    Corner,
    /// `(x, y)` is the center.
    Center,
}

/// Retained drawing state read by every primitive.
///
/// Color-accepting calls resolve their channels through the color space that
/// is active when the call is made; switching spaces later does not repaint
/// stored colors.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    stroke: Rgba,
    fill: Rgba,
    fill_enabled: bool,
    stroke_weight: i32,
    point_size: f32,
    rect_mode: RectMode,
    color_space: ColorSpace,
    projection: Projection,
    blend_mode: BlendMode,
    blending: bool,
    depth_test: bool,
    double_buffer: bool,
    light: Option<Light>,
    fog: Option<Fog>,
    canvas: Canvas,
}

impl RenderState {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            stroke: Rgba::white(),
            fill: Rgba::white(),
            fill_enabled: true,
            stroke_weight: 1,
            point_size: 1.0,
            rect_mode: RectMode::Corner,
            color_space: ColorSpace::Rgb,
            projection: Projection::TwoD,
            blend_mode: BlendMode::Alpha,
            blending: true,
            depth_test: false,
            double_buffer: true,
            light: None,
            fog: None,
            canvas,
        }
    }

    // ── color ────────────────────────────────────────────────────────────

    pub fn set_color_mode(&mut self, space: ColorSpace) {
        self.color_space = space;
    }

    /// Resolves `color` through the active color space.
    #[inline]
    pub fn resolve(&self, color: impl Into<Color>) -> Rgba {
        color.into().resolve(self.color_space)
    }

    /// Sets the stroke color. The stroke weight is left alone, so a stroke
    /// disabled by [`set_no_stroke`](Self::set_no_stroke) stays disabled.
    pub fn set_stroke(&mut self, color: impl Into<Color>) {
        self.stroke = self.resolve(color);
    }

    /// Sets the fill color and enables filling.
    pub fn set_fill(&mut self, color: impl Into<Color>) {
        self.fill = self.resolve(color);
        self.fill_enabled = true;
    }

    pub fn set_no_stroke(&mut self) {
        self.stroke_weight = 0;
    }

    pub fn set_no_fill(&mut self) {
        self.fill_enabled = false;
    }

    /// Sets the outline width and the point size to the same value. A later
    /// [`set_point_size`](Self::set_point_size) overrides the latter.
    pub fn set_stroke_weight(&mut self, weight: i32) {
        self.stroke_weight = weight.max(0);
        self.point_size = self.stroke_weight as f32;
    }

    pub fn set_point_size(&mut self, size: f32) {
        self.point_size = if size.is_finite() { size.max(0.0) } else { 0.0 };
    }

    // ── geometry ─────────────────────────────────────────────────────────

    pub fn set_rect_mode(&mut self, mode: RectMode) {
        self.rect_mode = mode;
    }

    /// Rectangle covered by `rect(x, y, w, h)` under the current mode.
    pub fn rect_bounds(&self, x: f32, y: f32, w: f32, h: f32) -> Rect {
        match self.rect_mode {
            RectMode::Corner => Rect::new(x, y, w, h),
            RectMode::Center => Rect::from_center(x, y, w, h),
        }
    }

    pub(crate) fn set_canvas_physical(&mut self, width: u32, height: u32) {
        self.canvas.set_physical(width, height);
    }

    // ── pipeline ─────────────────────────────────────────────────────────

    /// Switches projection. 2D turns blending on and depth testing off; 3D
    /// does the opposite.
    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
        let three_d = projection.is_3d();
        self.depth_test = three_d;
        self.blending = !three_d;
    }

    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend_mode = mode;
    }

    /// Blend mode to hand the renderer, `None` while blending is off.
    #[inline]
    pub fn active_blend(&self) -> Option<BlendMode> {
        self.blending.then_some(self.blend_mode)
    }

    pub fn disable_double_buffer(&mut self) {
        self.double_buffer = false;
    }

    /// `None` turns lighting off.
    pub fn set_light(&mut self, light: Option<Light>) {
        self.light = light;
    }

    pub fn set_fog(&mut self, fog: Option<Fog>) {
        self.fog = fog;
    }

    // ── accessors ────────────────────────────────────────────────────────

    #[inline]
    pub fn stroke(&self) -> Rgba {
        self.stroke
    }

    #[inline]
    pub fn fill(&self) -> Rgba {
        self.fill
    }

    #[inline]
    pub fn fill_enabled(&self) -> bool {
        self.fill_enabled
    }

    #[inline]
    pub fn stroke_weight(&self) -> i32 {
        self.stroke_weight
    }

    #[inline]
    pub fn stroke_enabled(&self) -> bool {
        self.stroke_weight > 0
    }

    #[inline]
    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    #[inline]
    pub fn rect_mode(&self) -> RectMode {
        self.rect_mode
    }

    #[inline]
    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    #[inline]
    pub fn projection(&self) -> Projection {
        self.projection
    }

    #[inline]
    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    #[inline]
    pub fn blending(&self) -> bool {
        self.blending
    }

    #[inline]
    pub fn light(&self) -> Option<Light> {
        self.light
    }

    #[inline]
    pub fn fog(&self) -> Option<Fog> {
        self.fog
    }

    #[inline]
    pub fn depth_test(&self) -> bool {
        self.depth_test
    }

    #[inline]
    pub fn double_buffer(&self) -> bool {
        self.double_buffer
    }

    #[inline]
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> RenderState {
        RenderState::new(Canvas::new(960, 540))
    }

    #[test]
    fn defaults() {
        let s = state();
        assert_eq!(s.stroke().to_u8(), [255, 255, 255, 255]);
        assert_eq!(s.fill().to_u8(), [255, 255, 255, 255]);
        assert!(s.fill_enabled());
        assert_eq!(s.stroke_weight(), 1);
        assert_eq!(s.rect_mode(), RectMode::Corner);
        assert_eq!(s.color_space(), ColorSpace::Rgb);
        assert_eq!(s.projection(), Projection::TwoD);
        assert!(s.blending());
        assert!(!s.depth_test());
        assert!(s.double_buffer());
        assert_eq!(s.light(), None);
        assert_eq!(s.fog(), None);
    }

    #[test]
    fn fill_reads_back_in_rgb() {
        let mut s = state();
        s.set_fill((255, 0, 0, 255));
        assert_eq!(s.fill().to_u8(), [255, 0, 0, 255]);
    }

    #[test]
    fn fill_re_enables_after_no_fill() {
        let mut s = state();
        s.set_no_fill();
        assert!(!s.fill_enabled());
        s.set_fill(10u8);
        assert!(s.fill_enabled());
    }

    #[test]
    fn stroke_color_does_not_re_enable_stroke() {
        let mut s = state();
        s.set_no_stroke();
        s.set_stroke((0, 255, 0));
        assert_eq!(s.stroke_weight(), 0);
        assert_eq!(s.stroke().to_u8(), [0, 255, 0, 255]);
    }

    #[test]
    fn stroke_alpha_is_kept() {
        let mut s = state();
        s.set_stroke((10, 20, 30, 40));
        assert_eq!(s.stroke().to_u8()[3], 40);
    }

    #[test]
    fn non_positive_weight_means_no_stroke() {
        let mut s = state();
        s.set_stroke_weight(-3);
        assert_eq!(s.stroke_weight(), 0);
        assert!(!s.stroke_enabled());
        s.set_stroke_weight(4);
        assert_eq!(s.stroke_weight(), 4);
    }

    #[test]
    fn colors_resolve_through_space_active_at_call_time() {
        let mut s = state();
        s.set_color_mode(ColorSpace::Hsb);
        s.set_fill((0, 0, 255));
        s.set_color_mode(ColorSpace::Rgb);
        let f = s.fill();
        assert_eq!(f.r, f.g);
        assert_eq!(f.g, f.b);
    }

    #[test]
    fn rect_modes() {
        let mut s = state();
        let r = s.rect_bounds(100.0, 100.0, 20.0, 20.0);
        assert_eq!((r.min().x, r.min().y, r.max().x, r.max().y), (100.0, 100.0, 120.0, 120.0));

        s.set_rect_mode(RectMode::Center);
        let r = s.rect_bounds(100.0, 100.0, 20.0, 20.0);
        assert_eq!((r.min().x, r.min().y, r.max().x, r.max().y), (90.0, 90.0, 110.0, 110.0));
    }

    #[test]
    fn projection_toggles_coupled_flags() {
        let mut s = state();
        s.set_projection(Projection::three_d());
        assert!(!s.blending());
        assert!(s.depth_test());
        assert_eq!(s.active_blend(), None);

        s.set_projection(Projection::TwoD);
        assert!(s.blending());
        assert!(!s.depth_test());
        assert_eq!(s.active_blend(), Some(BlendMode::Alpha));
    }

    #[test]
    fn stroke_weight_also_sizes_points() {
        let mut s = state();
        s.set_stroke_weight(4);
        assert_eq!(s.point_size(), 4.0);

        s.set_point_size(2.5);
        assert_eq!(s.point_size(), 2.5);
        assert_eq!(s.stroke_weight(), 4);
    }

    #[test]
    fn negative_point_size_is_clamped() {
        let mut s = state();
        s.set_point_size(-2.0);
        assert_eq!(s.point_size(), 0.0);
    }
}
