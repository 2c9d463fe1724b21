//! # Fetch & Session Module
//!
//! Composes the domain model, the loading primitives, and the catalog client
//! into a session-scoped workflow:
//! - the [`MediaLibrarySource`] capability trait over interchangeable
//!   library backends
//! - [`ArtworkSession`]: per-entity caches with an atomic
//!   check-presence-then-load (single-flight) contract, image decoding, and
//!   repaired-item tracking
//!
//! All session state is in-memory and lives for a single run; caches grow
//! monotonically and are never evicted.

pub mod error;
pub mod session;
pub mod source;

pub use error::{FetchError, Result};
pub use session::{ArtworkImage, ArtworkSession};
pub use source::{MediaLibrarySource, SourceKind};
