//! Shared error type across metryx crates.

use thiserror::Error;

use crate::state::MetricKind;

/// Shared result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type used by the core and its collaborator crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Bucket or quantile configuration rejected at state creation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// A family name was re-declared under an incompatible kind. The family
    /// keeps the kind it was first created with.
    #[error("metric `{name}` is registered as {existing}, requested {requested}")]
    KindMismatch {
        name: String,
        existing: MetricKind,
        requested: MetricKind,
    },
    /// The encoder collaborator failed while serializing one family.
    #[error("encode family `{family}`: {source}")]
    Encode {
        family: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// A writer panicked while holding the registry lock.
    #[error("registry lock poisoned")]
    LockPoisoned,
}
