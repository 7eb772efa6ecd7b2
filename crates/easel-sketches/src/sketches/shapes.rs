use easel_engine::core::{Context, Sketch};
use easel_engine::input::Key;
use easel_engine::paint::{palette, Color, ColorSpace};

/// Rotating solids under the default perspective, lit and fogged. Space
/// switches between filled and wireframe.
#[derive(Default)]
pub struct Shapes3d {
    angle: f32,
    wireframe: bool,
}

impl Shapes3d {
    fn spin(&self, ctx: &mut Context<'_>) {
        ctx.rotate_x(self.angle);
        ctx.rotate_y(self.angle);
        ctx.rotate_z(self.angle);
    }

    fn surface(&self, ctx: &mut Context<'_>, color: Color) {
        if self.wireframe {
            ctx.no_fill();
            ctx.stroke(color);
        } else {
            ctx.fill(color);
            ctx.stroke(palette::BLACK);
        }
    }
}

impl Sketch for Shapes3d {
    fn setup(&mut self, ctx: &mut Context<'_>) {
        ctx.set_3d();
        ctx.lights();
        ctx.enable_fog(70.0, 140.0, palette::c64::BLUE);
    }

    fn draw(&mut self, ctx: &mut Context<'_>) {
        if ctx.input().key_hit(Key::Space) {
            self.wireframe = !self.wireframe;
        }

        ctx.clear(palette::c64::BLUE);
        ctx.translate_3d(10.0, -15.0, -80.0);

        ctx.push_matrix();
        self.surface(ctx, palette::MAGENTA);
        ctx.translate_3d(-55.0, 0.0, 0.0);
        self.spin(ctx);
        ctx.cube(8.0);
        ctx.pop_matrix();

        ctx.push_matrix();
        self.surface(ctx, palette::c64::CYAN);
        ctx.translate_3d(-55.0, 35.0, 0.0);
        self.spin(ctx);
        ctx.box3d(5.0, 10.0, 15.0);
        ctx.pop_matrix();

        // Flat quad built from raw vertices.
        ctx.push_matrix();
        self.surface(ctx, palette::BLUE);
        ctx.translate_3d(-20.0, 0.0, 0.0);
        self.spin(ctx);
        ctx.begin_shape(true);
        ctx.vertex_3d(-10.0, -10.0, 0.0);
        ctx.vertex_3d(10.0, -10.0, 0.0);
        ctx.vertex_3d(10.0, 10.0, 0.0);
        ctx.vertex_3d(-10.0, 10.0, 0.0);
        ctx.end_shape();
        ctx.pop_matrix();

        // Round solids along the bottom.
        let solids: [fn(&mut Context<'_>); 5] = [
            |ctx| ctx.sphere(6.0),
            |ctx| ctx.torus(5.0, 2.0),
            |ctx| ctx.cylinder(4.0, 8.0),
            |ctx| ctx.cone(4.0, 8.0),
            |ctx| ctx.pyramid(4.0, 6.0),
        ];
        for (i, solid) in solids.iter().enumerate() {
            ctx.push_matrix();
            self.surface(ctx, palette::YELLOW);
            ctx.translate_3d(-55.0 + i as f32 * 22.0, -35.0, -10.0 * i as f32);
            self.spin(ctx);
            solid(ctx);
            ctx.pop_matrix();
        }

        // A ring of cubes walking around the hue wheel.
        ctx.color_mode(ColorSpace::Hsb);
        for i in 0..8u8 {
            ctx.push_matrix();
            ctx.translate_3d(30.0, 0.0, 0.0);
            ctx.rotate_z(self.angle + i as f32 * 45.0);
            ctx.translate_3d(18.0, 0.0, 0.0);
            self.surface(ctx, Color::new(i * 32, 200, 255));
            ctx.cube(2.5);
            ctx.pop_matrix();
        }
        ctx.color_mode(ColorSpace::Rgb);

        self.angle = (self.angle + 60.0 * ctx.delta_time()) % 360.0;
    }
}
