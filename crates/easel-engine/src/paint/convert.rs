//! Hue-based color space conversion.
//!
//! Channel bytes are mapped to `[0, 1)` by dividing by 256, not 255. Existing
//! sketches were tuned against that scale (e.g. HSB brightness 255 gives
//! `255/256`, not full white), so it is kept bit-for-bit.

/// Divisor that maps a channel byte into the unit interval.
pub const CHANNEL_SCALE: f32 = 256.0;

#[inline]
fn unit(v: u8) -> f32 {
    v as f32 / CHANNEL_SCALE
}

/// HSB (a.k.a. HSV) bytes to normalized RGB.
///
/// Six 60° sectors; saturation 0 collapses to the brightness gray.
pub fn hsb_to_rgb(hue: u8, saturation: u8, brightness: u8) -> [f32; 3] {
    let h = unit(hue);
    let s = unit(saturation);
    let v = unit(brightness);

    if s == 0.0 {
        return [v, v, v];
    }

    let h = h * 6.0;
    let sector = h as i32;
    let f = h - sector as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match sector {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// HSL bytes to normalized RGB.
pub fn hsl_to_rgb(hue: u8, saturation: u8, lightness: u8) -> [f32; 3] {
    let h = unit(hue);
    let s = unit(saturation);
    let l = unit(lightness);

    if s == 0.0 {
        return [l, l, l];
    }

    let upper = if l < 0.5 { l * (1.0 + s) } else { (l + s) - (l * s) };
    let lower = 2.0 * l - upper;

    let mut red = h + 1.0 / 3.0;
    if red > 1.0 {
        red -= 1.0;
    }
    let green = h;
    let mut blue = h - 1.0 / 3.0;
    if blue < 0.0 {
        blue += 1.0;
    }

    [
        hue_segment(lower, upper, red),
        hue_segment(lower, upper, green),
        hue_segment(lower, upper, blue),
    ]
}

/// Piecewise-linear ramp for one channel at hue position `t` in `[0, 1]`.
fn hue_segment(lower: f32, upper: f32, t: f32) -> f32 {
    if t < 1.0 / 6.0 {
        lower + (upper - lower) * 6.0 * t
    } else if t < 0.5 {
        upper
    } else if t < 2.0 / 3.0 {
        lower + (upper - lower) * ((2.0 / 3.0) - t) * 6.0
    } else {
        lower
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn hsb_zero_saturation_is_gray_at_brightness() {
        let [r, g, b] = hsb_to_rgb(0, 0, 255);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert!(close(r, 255.0 / 256.0));
    }

    #[test]
    fn hsb_hue_zero_is_red() {
        let [r, g, b] = hsb_to_rgb(0, 255, 255);
        assert!(close(r, 255.0 / 256.0));
        assert!(g < 0.01);
        assert!(b < 0.01);
    }

    #[test]
    fn hsb_third_of_the_wheel_is_green() {
        // 256 / 3 ≈ 85 lands at the start of sector 2.
        let [r, g, b] = hsb_to_rgb(86, 255, 255);
        assert!(g > 0.99);
        assert!(r < 0.05);
        assert!(b < 0.05);
    }

    #[test]
    fn hsb_is_continuous_across_sectors_and_wrap() {
        let mut prev = hsb_to_rgb(0, 255, 255);
        for h in 1..=255u8 {
            let cur = hsb_to_rgb(h, 255, 255);
            for c in 0..3 {
                assert!(
                    (cur[c] - prev[c]).abs() < 0.05,
                    "jump at hue {h}: {prev:?} -> {cur:?}"
                );
            }
            prev = cur;
        }

        // Wrapping from the last hue byte back to 0.
        let first = hsb_to_rgb(0, 255, 255);
        for c in 0..3 {
            assert!((first[c] - prev[c]).abs() < 0.05);
        }
    }

    #[test]
    fn hsl_zero_saturation_is_gray_at_lightness() {
        let [r, g, b] = hsl_to_rgb(100, 0, 128);
        assert!(close(r, 0.5));
        assert!(close(g, 0.5));
        assert!(close(b, 0.5));
    }

    #[test]
    fn hsl_hue_zero_half_lightness_is_red() {
        let [r, g, b] = hsl_to_rgb(0, 255, 128);
        assert!(r > 0.99);
        assert!(g < 0.01);
        assert!(b < 0.01);
    }

    #[test]
    fn hsl_full_lightness_is_near_white() {
        let [r, g, b] = hsl_to_rgb(40, 255, 255);
        assert!(r > 0.99 && g > 0.99 && b > 0.99);
    }
}
