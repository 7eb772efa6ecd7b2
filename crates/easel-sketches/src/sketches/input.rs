use rand::Rng;

use easel_engine::core::{Context, Sketch};
use easel_engine::input::{GamepadButton, Key, MouseButton};
use easel_engine::paint::{palette, Color};

/// Shows the input snapshot: button boxes, a draggable attractor, a cursor
/// dot whose color changes on clicks and key presses, and the left stick.
pub struct InputDemo {
    color: Color,
    attractor: Attractor,
}

impl Default for InputDemo {
    fn default() -> Self {
        Self {
            color: palette::WHITE,
            attractor: Attractor::new(480.0, 270.0),
        }
    }
}

impl InputDemo {
    fn reroll(&mut self) {
        let mut rng = rand::thread_rng();
        self.color = Color::new(rng.r#gen(), rng.r#gen(), rng.r#gen());
    }
}

impl Sketch for InputDemo {
    fn setup(&mut self, ctx: &mut Context<'_>) {
        let (cx, cy) = (ctx.width() as f32 / 2.0, ctx.height() as f32 / 2.0);
        self.attractor = Attractor::new(cx, cy);
    }

    fn draw(&mut self, ctx: &mut Context<'_>) {
        ctx.clear((90, 80, 140));
        ctx.stroke((0, 255, 0));

        let input = ctx.input().clone();
        let (mx, my) = (ctx.mouse_x() as f32, ctx.mouse_y() as f32);

        let boxes = [
            (MouseButton::Left, palette::BLUE, 10.0),
            (MouseButton::Middle, palette::RED, 100.0),
            (MouseButton::Right, palette::PURPLE, 200.0),
        ];
        for (button, color, x) in boxes {
            if input.mouse_down(button) {
                ctx.fill(color);
                ctx.rect(x, 10.0, 100.0, 100.0);
            }
        }

        if input.mouse_clicked(MouseButton::Left)
            || input.mouse_released(MouseButton::Left)
            || input.key_down(Key::Space)
            || input.key_up(Key::ArrowUp)
            || input.key_hit(Key::A)
            || input.gamepad_pressed(GamepadButton::A)
        {
            self.reroll();
        }

        if input.mouse_moved() {
            self.attractor.hover(mx, my);
        }
        if input.mouse_clicked(MouseButton::Left) {
            self.attractor.press(mx, my);
        }
        if input.mouse_dragged() {
            self.attractor.hover(mx, my);
            self.attractor.drag(mx, my);
        }
        if input.mouse_released(MouseButton::Left) {
            self.attractor.release();
        }
        self.attractor.display(ctx);

        if input.gamepad_connected() {
            let stick = input.left_stick();
            ctx.no_fill();
            ctx.stroke(palette::YELLOW);
            ctx.circle(60.0, 480.0, 40.0);
            ctx.line(60.0, 480.0, 60.0 + stick.x * 40.0, 480.0 - stick.y * 40.0);
        }

        ctx.stroke((0, 255, 0));
        ctx.fill(self.color);
        ctx.circle(mx, my, 10.0);

        if input.key_hit(Key::T) {
            let title = format!("input: frame {}", ctx.frame_count());
            ctx.set_window_title(&title);
        }
    }
}

const MASS: f32 = 20.0;

/// Circle that can be grabbed and dragged with the left button.
struct Attractor {
    x: f32,
    y: f32,
    offset: (f32, f32),
    dragging: bool,
    rollover: bool,
}

impl Attractor {
    fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            offset: (0.0, 0.0),
            dragging: false,
            rollover: false,
        }
    }

    fn contains(&self, mx: f32, my: f32) -> bool {
        (mx - self.x).hypot(my - self.y) < MASS * 2.0
    }

    fn hover(&mut self, mx: f32, my: f32) {
        self.rollover = self.contains(mx, my);
    }

    fn press(&mut self, mx: f32, my: f32) {
        if self.contains(mx, my) {
            self.dragging = true;
            self.offset = (self.x - mx, self.y - my);
        }
    }

    fn drag(&mut self, mx: f32, my: f32) {
        if self.dragging {
            self.x = mx + self.offset.0;
            self.y = my + self.offset.1;
        }
    }

    fn release(&mut self) {
        self.dragging = false;
    }

    fn display(&self, ctx: &mut Context<'_>) {
        let color = if self.dragging {
            palette::RED
        } else if self.rollover {
            palette::BLUE
        } else {
            palette::GREEN
        };
        ctx.fill(color);
        ctx.circle(self.x, self.y, MASS * 2.0);
    }
}
