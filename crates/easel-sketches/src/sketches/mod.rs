mod input;
mod shapes;
mod snow;
mod stars;

pub use input::InputDemo;
pub use shapes::Shapes3d;
pub use snow::Snow;
pub use stars::Stars;
