pub mod destination;
pub mod source;
pub mod sync;

pub use destination::DestinationConfig;
pub use source::SourceConfig;
pub use sync::SyncConfig;
