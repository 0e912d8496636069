pub mod report;
pub mod stage;

pub use report::*;
pub use stage::*;
