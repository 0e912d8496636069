pub mod configuration;
pub mod error;
pub mod record;
pub mod run;

pub use configuration::*;
pub use error::*;
pub use record::*;
pub use run::*;
