mod json;
mod string;
mod timed;

pub use json::*;
pub use string::*;
pub use timed::*;
