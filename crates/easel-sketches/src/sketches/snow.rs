use rand::Rng;

use easel_engine::core::{Context, Sketch};
use easel_engine::paint::palette;

const MAX_FLAKES: usize = 2000;
const MAX_LAYERS: i32 = 5;

struct Flake {
    x: i32,
    y: i32,
    layer: i32,
}

/// Falling snow; deeper layers fall faster.
pub struct Snow {
    flakes: Vec<Flake>,
}

impl Snow {
    pub fn new(width: u32, height: u32) -> Self {
        let mut rng = rand::thread_rng();
        let flakes = (0..MAX_FLAKES)
            .map(|_| Flake {
                x: rng.gen_range(0..width.max(1) as i32),
                y: rng.gen_range(0..height.max(1) as i32),
                layer: rng.gen_range(0..MAX_LAYERS),
            })
            .collect();
        Self { flakes }
    }
}

impl Sketch for Snow {
    fn setup(&mut self, ctx: &mut Context<'_>) {
        ctx.stroke(palette::WHITE);
    }

    fn draw(&mut self, ctx: &mut Context<'_>) {
        let (w, h) = (ctx.width() as i32, ctx.height() as i32);
        let mut rng = rand::thread_rng();

        ctx.clear(palette::c64::BLUE);

        for flake in &mut self.flakes {
            flake.y += flake.layer + 1;
            if flake.y > h {
                flake.x = rng.gen_range(0..w.max(1));
                flake.y = 0;
                flake.layer = rng.gen_range(0..MAX_LAYERS);
            }

            // Shake.
            flake.x += rng.gen_range(-2..=2);
            ctx.point(flake.x as f32, flake.y as f32);
        }
    }
}
