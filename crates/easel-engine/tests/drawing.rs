use easel_engine::core::{CanvasConfig, Context, FrameLoop, Sketch};
use easel_engine::paint::{Color, ColorSpace, Rgba};
use easel_engine::render::{
    BlendMode, HeadlessRenderer, Light, PresentMode, Primitive, Projection, RectMode,
};
use easel_engine::input::PlatformEvent;
use easel_engine::window::{HeadlessPlatform, ScriptedFrame};

type Loop = FrameLoop<HeadlessPlatform, HeadlessRenderer>;

fn build(config: CanvasConfig) -> Loop {
    let platform = HeadlessPlatform::new(config.width, config.height);
    let renderer = HeadlessRenderer::new(config.canvas());
    FrameLoop::new(platform, renderer, &config)
}

/// Runs `f` as the draw callback for exactly one frame.
fn one_frame(fl: &mut Loop, f: impl FnMut(&mut Context<'_>)) {
    struct Once<F>(F);
    impl<F: FnMut(&mut Context<'_>)> Sketch for Once<F> {
        fn draw(&mut self, ctx: &mut Context<'_>) {
            (self.0)(ctx)
        }
    }
    fl.step(&mut Once(f)).unwrap();
}

#[test]
fn fill_is_stored_as_given() {
    let mut fl = build(CanvasConfig::new(960, 540));
    one_frame(&mut fl, |ctx| ctx.fill((255u8, 0u8, 0u8, 255u8)));

    let state = fl.state();
    assert_eq!(state.fill().to_u8(), [255, 0, 0, 255]);
    assert!(state.fill_enabled());
    assert_eq!(state.color_space(), ColorSpace::Rgb);
}

#[test]
fn rect_mode_changes_rect_bounds() {
    let mut fl = build(CanvasConfig::new(960, 540));
    one_frame(&mut fl, |ctx| {
        ctx.no_stroke();
        ctx.fill(255u8);
        ctx.rect_mode(RectMode::Center);
        ctx.rect(100.0, 100.0, 20.0, 20.0);
        ctx.rect_mode(RectMode::Corner);
        ctx.rect(100.0, 100.0, 20.0, 20.0);
    });

    let draws = &fl.renderer().draws;
    assert_eq!(draws.len(), 2);

    let bounds = |vs: &[glam::Vec3]| {
        let xs = vs.iter().map(|v| v.x);
        let ys = vs.iter().map(|v| v.y);
        (
            xs.clone().fold(f32::MAX, f32::min),
            xs.fold(f32::MIN, f32::max),
            ys.clone().fold(f32::MAX, f32::min),
            ys.fold(f32::MIN, f32::max),
        )
    };
    assert_eq!(bounds(&draws[0].vertices), (90.0, 110.0, 90.0, 110.0));
    assert_eq!(bounds(&draws[1].vertices), (100.0, 120.0, 100.0, 120.0));
}

#[test]
fn projection_toggle_swaps_blending_and_depth() {
    let mut fl = build(CanvasConfig::new(960, 540));

    one_frame(&mut fl, |ctx| ctx.set_3d());
    assert!(!fl.state().blending());
    assert!(fl.state().depth_test());
    assert!(fl.renderer().projection.is_3d());
    assert!(fl.renderer().depth_test);
    assert_eq!(fl.renderer().blending, None);

    one_frame(&mut fl, |ctx| ctx.set_2d());
    assert!(fl.state().blending());
    assert!(!fl.state().depth_test());
    assert_eq!(fl.renderer().projection, Projection::TwoD);
    assert_eq!(fl.renderer().blending, Some(BlendMode::Alpha));
}

#[test]
fn three_d_config_starts_in_perspective() {
    let fl = build(CanvasConfig::new(640, 480).three_d());
    assert!(fl.state().projection().is_3d());
    assert!(fl.renderer().depth_test);
}

#[test]
fn resize_keeps_the_current_projection() {
    let mut fl = build(CanvasConfig::new(320, 240));
    one_frame(&mut fl, |ctx| ctx.set_3d());

    fl.platform_mut()
        .push_frame(ScriptedFrame::new().event(PlatformEvent::Resized { width: 960, height: 720 }));
    one_frame(&mut fl, |_| {});

    assert!(fl.renderer().projection.is_3d());
    assert!(fl.renderer().depth_test);
    assert_eq!(fl.state().canvas().scale(), (3, 3));
}

#[test]
fn minimized_window_is_ignored() {
    let mut fl = build(CanvasConfig::new(320, 240));
    fl.platform_mut()
        .push_frame(ScriptedFrame::new().event(PlatformEvent::Resized { width: 0, height: 0 }));
    one_frame(&mut fl, |_| {});

    assert_eq!(fl.state().canvas().physical_width, 320);
    assert_eq!(fl.renderer().surface_size, (320, 240));
}

#[test]
fn hsb_mode_resolves_fill_through_hsb() {
    let mut fl = build(CanvasConfig::new(320, 240));
    one_frame(&mut fl, |ctx| {
        ctx.color_mode(ColorSpace::Hsb);
        ctx.fill((0u8, 0u8, 255u8));
        ctx.stroke(Color::rgb(0, 255, 0).alpha(128));
    });

    let fill = fl.state().fill();
    assert_eq!(fill.r, fill.g);
    assert_eq!(fill.g, fill.b);
    assert!((fill.r - 255.0 / 256.0).abs() < 1e-6);
    assert_eq!(fl.state().stroke().to_u8(), [0, 255, 0, 128]);
}

#[test]
fn background_clears_with_resolved_color() {
    let mut fl = build(CanvasConfig::new(320, 240));
    one_frame(&mut fl, |ctx| ctx.background((10u8, 20u8, 30u8)));
    assert_eq!(fl.renderer().clears, vec![Rgba::from_u8(10, 20, 30, 255)]);
}

#[test]
fn shapes_draw_fill_then_outline() {
    let mut fl = build(CanvasConfig::new(320, 240));
    one_frame(&mut fl, |ctx| {
        ctx.fill(200u8);
        ctx.stroke(0u8);
        ctx.circle(50.0, 50.0, 10.0);
    });

    let draws = &fl.renderer().draws;
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[0].primitive, Primitive::TriangleFan);
    assert_eq!(draws[1].primitive, Primitive::LineLoop);
}

#[test]
fn no_fill_shape_is_outline_only() {
    let mut fl = build(CanvasConfig::new(320, 240));
    one_frame(&mut fl, |ctx| {
        ctx.no_fill();
        ctx.begin_shape(false);
        ctx.vertex(0.0, 0.0);
        ctx.vertex(10.0, 0.0);
        ctx.vertex(10.0, 10.0);
        ctx.end_shape();
    });

    let draws = &fl.renderer().draws;
    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].primitive, Primitive::LineStrip);
}

#[test]
fn translate_applies_within_the_frame_only() {
    let mut fl = build(CanvasConfig::new(320, 240));
    one_frame(&mut fl, |ctx| {
        ctx.no_stroke();
        ctx.translate(5.0, 7.0);
        ctx.rect(0.0, 0.0, 1.0, 1.0);
    });
    assert_eq!(fl.renderer().draws[0].vertices[0], glam::Vec3::new(5.0, 7.0, 0.0));

    one_frame(&mut fl, |ctx| {
        ctx.no_stroke();
        ctx.rect(0.0, 0.0, 1.0, 1.0);
    });
    assert_eq!(fl.renderer().draws[1].vertices[0], glam::Vec3::new(0.0, 0.0, 0.0));
}

#[test]
fn disabling_double_buffer_switches_to_flush() {
    let mut fl = build(CanvasConfig::new(320, 240));
    one_frame(&mut fl, |_| {});
    one_frame(&mut fl, |ctx| ctx.disable_double_buffer());

    assert_eq!(fl.renderer().presents, vec![PresentMode::Swap, PresentMode::Flush]);
    assert!(!fl.renderer().double_buffer);
}

#[test]
fn stroke_weight_widens_points() {
    let mut fl = build(CanvasConfig::new(320, 240));
    one_frame(&mut fl, |ctx| {
        ctx.stroke(255u8);
        ctx.stroke_weight(4);
        ctx.point(20.0, 30.0);
        ctx.point_size(1.0);
        ctx.point(20.0, 30.0);
    });

    let draws = &fl.renderer().draws;
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[0].primitive, Primitive::Quads);
    assert_eq!(draws[0].vertices[0], glam::Vec3::new(18.0, 28.0, 0.0));
    assert_eq!(draws[0].vertices[2], glam::Vec3::new(22.0, 32.0, 0.0));
    assert_eq!(draws[1].primitive, Primitive::Points);
}

#[test]
fn lights_and_fog_reach_later_draws_and_survive_frames() {
    let mut fl = build(CanvasConfig::new(320, 240));
    one_frame(&mut fl, |ctx| {
        ctx.set_3d();
        ctx.lights();
        ctx.enable_fog(10.0, 50.0, 0u8);
        ctx.sphere(5.0);
    });
    let d = &fl.renderer().draws[0];
    assert_eq!(d.primitive, Primitive::Triangles);
    assert_eq!(d.light, Some(Light::default()));
    assert_eq!(d.fog.map(|f| (f.start, f.end)), Some((10.0, 50.0)));

    one_frame(&mut fl, |ctx| {
        ctx.pyramid(1.0, 2.0);
        ctx.no_lights();
        ctx.disable_fog();
        ctx.pyramid(1.0, 2.0);
    });
    let draws = &fl.renderer().draws;
    assert!(draws[1].light.is_some() && draws[1].fog.is_some());
    assert_eq!((draws[2].light, draws[2].fog), (None, None));
    assert_eq!(fl.state().light(), None);
}

#[test]
fn directional_light_takes_the_resolved_color() {
    let mut fl = build(CanvasConfig::new(320, 240));
    one_frame(&mut fl, |ctx| {
        ctx.directional_light((255u8, 0u8, 0u8), 0.0, 0.0, 2.0);
        ctx.plane(10.0, 10.0);
    });
    let light = fl.renderer().draws[0].light.unwrap();
    assert_eq!(light.diffuse, glam::Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(light.direction, glam::Vec3::Z);
}

#[test]
fn solids_fill_or_fall_back_to_wireframe() {
    let mut fl = build(CanvasConfig::new(320, 240));
    one_frame(&mut fl, |ctx| {
        ctx.fill(200u8);
        ctx.stroke(255u8);
        ctx.cone(2.0, 4.0);
        ctx.no_fill();
        ctx.torus(10.0, 2.0);
        ctx.no_stroke();
        ctx.cylinder(1.0, 1.0);
    });

    let draws = &fl.renderer().draws;
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[0].primitive, Primitive::Triangles);
    assert_eq!(draws[0].color.to_u8(), [200, 200, 200, 255]);
    assert_eq!(draws[1].primitive, Primitive::Lines);
    assert_eq!(draws[1].color.to_u8(), [255, 255, 255, 255]);
}

#[test]
fn sprite_ignores_the_current_transform() {
    let mut fl = build(CanvasConfig::new(320, 240));
    one_frame(&mut fl, |ctx| {
        let Some(tex) = ctx.create_texture(1, 1, &[1, 2, 3, 4]) else {
            panic!("texture rejected");
        };
        ctx.translate(100.0, 100.0);
        ctx.sprite(&tex, 10.0, 20.0, 8.0, 4.0);
        ctx.sprite_3d(&tex, glam::Vec3::ZERO, 8.0, 4.0);
        assert_eq!(ctx.read_texture(&tex), Some(vec![1, 2, 3, 4]));
    });

    let draws = &fl.renderer().draws;
    assert!(draws[0].texture.is_some());
    assert_eq!(draws[0].vertices[0], glam::Vec3::new(10.0, 20.0, 0.0));
    assert_eq!(draws[0].vertices[2], glam::Vec3::new(18.0, 24.0, 0.0));
    assert_eq!(draws[1].vertices[0], glam::Vec3::new(100.0, 100.0, 1.0));
}
