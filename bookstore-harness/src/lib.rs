//! # Bookstore Harness
//!
//! Plumbing for the bookstore WebAPI end-to-end suite:
//!
//! - configuration loading (`bookstore.toml` + env overrides)
//! - a thin HTTP client wrapper with per-call request/response recording
//! - structured log formatting for domain entities and responses
//! - a console tee capture that duplicates suite output into a report file
//! - test lifecycle banners and non-panicking check macros
//!
//! ## Architecture (block diagram)
//!
//! ```text
//! +-----------------+      +--------------------+      +------------------+
//! | config          | ---> | BookStoreClient    | ---> | remote bookstore |
//! | bookstore.toml  |      | (reqwest wrapper)  |      | API (JSON/HTTP)  |
//! +-----------------+      +--------------------+      +------------------+
//!                                   |
//!                                   v (Recorder)
//! +-----------------+      +--------------------+      +------------------+
//! | recorder        | ---> | logger             | ---> | capture sink     |
//! | test banners    |      | entity formatting  |      | console + file   |
//! +-----------------+      +--------------------+      +------------------+
//! ```
//!
//! Test bodies use [`recorder::run_test`] around their logic and the
//! [`check!`]/[`check_eq!`]/[`check_ne!`] macros for assertions; everything
//! they log lands in the console and, while a [`CaptureSession`] is active,
//! in the report file as well.

#[doc(hidden)]
pub mod assertion;
pub mod capture;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod model;
pub mod recorder;

// Re-export error handling and comparison crates used by the macros.
pub use eyre;
pub use pretty_assertions;

pub use capture::{CaptureMode, CaptureSession};
pub use config::{ApiConfig, Config};
pub use error::{Error, Result};
pub use http::{BookStoreClient, Recorder, Response};
pub use model::{Author, Book};

/// Initialize internal diagnostics from the `RUST_LOG` env filter.
/// Safe to call more than once; later calls are no-ops.
pub fn init_diagnostics() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
