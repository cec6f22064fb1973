mod core;
mod style;

pub use self::core::*;
pub use style::*;
