mod canvas;
mod color;
mod images;

pub use canvas::*;
pub use color::*;
pub use images::*;
