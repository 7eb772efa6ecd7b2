
/// Logical drawing surface plus the physical window it is shown in.
///
/// Sketches draw in logical pixels. The window may be larger (fullscreen,
/// user resize, HiDPI); the canvas is then scaled by a whole-number factor per
/// axis and anchored top-left.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub physical_width: u32,
    pub physical_height: u32,
}

impl Canvas {
    /// Canvas whose window has exactly the logical size.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            physical_width: width,
            physical_height: height,
        }
    }

    #[inline]
    pub fn with_physical(mut self, width: u32, height: u32) -> Self {
        self.physical_width = width;
        self.physical_height = height;
        self
    }

    #[inline]
    pub fn set_physical(&mut self, width: u32, height: u32) {
        self.physical_width = width;
        self.physical_height = height;
    }

    /// Integer physical/logical scale per axis.
    ///
    /// Each ratio is floored. If either is non-positive (window smaller than
    /// the canvas, or a zero-sized canvas) both collapse to 1.
    pub fn scale(&self) -> (i32, i32) {
        let ratio = |physical: u32, logical: u32| {
            if logical == 0 {
                0
            } else {
                (physical / logical) as i32
            }
        };

        let sx = ratio(self.physical_width, self.width);
        let sy = ratio(self.physical_height, self.height);
        if sx <= 0 || sy <= 0 { (1, 1) } else { (sx, sy) }
    }

    /// Maps a window-client position (physical pixels) to canvas pixels.
    pub fn to_logical(&self, x: i32, y: i32) -> (i32, i32) {
        let (sx, sy) = self.scale();
        (x.div_euclid(sx), y.div_euclid(sy))
    }

    /// Physical size of the scaled canvas inside the window.
    pub fn scaled_size(&self) -> (u32, u32) {
        let (sx, sy) = self.scale();
        (
            (self.width * sx as u32).min(self.physical_width.max(1)),
            (self.height * sy as u32).min(self.physical_height.max(1)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_size_window_maps_one_to_one() {
        let c = Canvas::new(960, 540);
        assert_eq!(c.scale(), (1, 1));
        assert_eq!(c.to_logical(100, 200), (100, 200));
    }

    #[test]
    fn doubled_window_halves_coordinates() {
        let c = Canvas::new(960, 540).with_physical(1920, 1080);
        assert_eq!(c.scale(), (2, 2));
        assert_eq!(c.to_logical(1919, 1079), (959, 539));
    }

    #[test]
    fn each_axis_uses_its_own_ratio() {
        let c = Canvas::new(100, 100).with_physical(300, 200);
        assert_eq!(c.scale(), (3, 2));
        assert_eq!(c.to_logical(150, 150), (50, 75));
    }

    #[test]
    fn ratio_is_floored() {
        let c = Canvas::new(960, 540).with_physical(1800, 1000);
        assert_eq!(c.scale(), (1, 1));
    }

    #[test]
    fn degenerate_ratio_falls_back_to_identity() {
        // Window narrower than the canvas on one axis.
        let c = Canvas::new(960, 540).with_physical(400, 1080);
        assert_eq!(c.scale(), (1, 1));

        let zero = Canvas::new(0, 0).with_physical(640, 480);
        assert_eq!(zero.scale(), (1, 1));
        assert_eq!(zero.to_logical(10, 10), (10, 10));
    }

    #[test]
    fn scaled_size_is_clamped_to_window() {
        let c = Canvas::new(100, 50).with_physical(250, 120);
        assert_eq!(c.scale(), (2, 2));
        assert_eq!(c.scaled_size(), (200, 100));
    }
}
