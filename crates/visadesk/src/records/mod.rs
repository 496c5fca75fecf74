//! Portal entities and the repositories that hold them.
//!
//! Every entity goes through `RecordRepository`; whether it lives in local memory or
//! in the document store is picked once at wiring time.

pub mod domain;
pub mod repository;
pub mod seed;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use domain::{
    ApplicationId, ApplicationRecord, BrokerId, BrokerRecord, BrokerStatus, ClientId,
    ClientRecord, PaymentRecord, PaymentState,
};
pub use repository::{InMemoryRepository, RecordRepository, RepositoryError, StoreRepository};
pub use seed::SeedData;

/// A keyed entity stored in one collection.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;
    /// Prefix of generated ids, e.g. `ROB` for `ROB-001`.
    const ID_PREFIX: &'static str;

    fn id(&self) -> &str;
}

/// Next `PREFIX-nnn` id after the highest numeric suffix among `existing`.
///
/// Ids with another prefix or a non-numeric suffix are ignored.
pub fn next_sequential_id<'a>(
    prefix: &str,
    existing: impl IntoIterator<Item = &'a str>,
) -> String {
    let highest = existing
        .into_iter()
        .filter_map(|id| id.strip_prefix(prefix)?.strip_prefix('-')?.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{prefix}-{:03}", highest + 1)
}
