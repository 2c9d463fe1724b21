//! # HTTP Bridge
//!
//! Abstracts HTTP operations behind the [`HttpClient`] trait so the catalog
//! client can be exercised against mocks while the desktop binary uses the
//! reqwest-backed implementation.

pub mod error;
pub mod http;
pub mod reqwest_client;

pub use error::{HttpError, Result};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy};
pub use reqwest_client::ReqwestHttpClient;
