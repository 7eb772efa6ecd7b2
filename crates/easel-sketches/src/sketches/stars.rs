use rand::Rng;

use easel_engine::core::{Context, Sketch};
use easel_engine::paint::palette;

const STAR_COUNT: usize = 600;
const PLANE_SHADES: [u8; 3] = [0x30, 0x80, 0xff];

#[derive(Debug, Copy, Clone)]
struct Star {
    x: f32,
    y: f32,
    plane: usize,
}

/// Three-plane starfield. The mouse picks the direction (left or right half)
/// and the speed (height).
pub struct Stars {
    stars: Vec<Star>,
}

impl Stars {
    pub fn new(width: u32, height: u32) -> Self {
        let mut rng = rand::thread_rng();
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: rng.gen_range(0..width.max(1)) as f32,
                y: rng.gen_range(0..height.max(1)) as f32,
                plane: rng.gen_range(0..PLANE_SHADES.len()),
            })
            .collect();
        Self { stars }
    }
}

impl Sketch for Stars {
    fn draw(&mut self, ctx: &mut Context<'_>) {
        let (w, h) = (ctx.width(), ctx.height());
        let to_right = ctx.mouse_x() > (w / 2) as i32;
        let speed = ctx.mouse_y() as f32 / 80.0;
        let mut rng = rand::thread_rng();

        ctx.clear(palette::BLACK);

        for star in &mut self.stars {
            let step = (1.0 + star.plane as f32) * speed;
            let shade = PLANE_SHADES[star.plane];

            if to_right {
                star.x += step;
                if star.x > w as f32 {
                    // Negative offset keeps fast stars from lining up.
                    star.x = -(rng.gen_range(0..100) as f32);
                    star.y = rng.gen_range(0..h.max(1)) as f32;
                }
                ctx.stroke((0, shade, 0));
                ctx.point(star.x.trunc(), star.y.trunc());
            } else {
                star.x -= step;
                if star.x <= 0.0 {
                    star.x = (rng.gen_range(0..100) + w) as f32;
                    star.y = rng.gen_range(0..h.max(1)) as f32;
                }
                ctx.no_stroke();
                ctx.fill((0, 0, shade));
                ctx.circle(star.x.trunc(), star.y.trunc(), 2.0);
            }
        }
    }
}
