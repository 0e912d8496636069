pub mod extractor;
pub mod orchestrator;
pub mod reconciler;

#[cfg(test)]
pub(crate) mod testing;

pub use extractor::Extractor;
pub use orchestrator::SyncJob;
pub use reconciler::{map_organization, map_users, Reconciler};
