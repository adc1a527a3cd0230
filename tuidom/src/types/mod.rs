mod color;
mod enums;
mod style;

pub use color::{Color, Rgb};
pub use enums::Length;
pub use style::Style;
