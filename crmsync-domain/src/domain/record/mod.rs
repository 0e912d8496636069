pub mod account;
pub mod contact;
pub mod extraction;
pub mod organization;
pub mod user;
pub mod window;

pub use account::*;
pub use contact::*;
pub use extraction::*;
pub use organization::*;
pub use user::*;
pub use window::*;
