//! Workspace facade crate.
//!
//! Exposes feature flags that map to the individual workspace crates
//! (`core-fetch`, `core-runtime`, `bridge-http`). Host applications can
//! depend on `covergap-workspace` and enable the documented features without
//! wiring each crate individually.

#[cfg(feature = "desktop")]
pub use bridge_http;
#[cfg(feature = "desktop")]
pub use core_fetch;
#[cfg(feature = "desktop")]
pub use core_runtime;
