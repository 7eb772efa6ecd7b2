use super::ctx::Context;

/// A user program driven by the frame loop.
///
/// `setup` runs once before the first frame, `draw` once per frame and
/// `cleanup` once after the loop stops (also after a fatal presentation
/// error). To stop, call [`Context::quit`].
pub trait Sketch {
    fn setup(&mut self, ctx: &mut Context<'_>) {
        let _ = ctx;
    }

    fn draw(&mut self, ctx: &mut Context<'_>);

    fn cleanup(&mut self, ctx: &mut Context<'_>) {
        let _ = ctx;
    }
}
