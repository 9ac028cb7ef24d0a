//! # apigen
//!
//! **apigen** generates typed TypeScript client libraries from API discovery
//! documents: one binding per API version, one runnable usage sample per
//! method, and the package manifests and indexes that stitch them into a
//! single library.
//!
//! ## Architecture
//!
//! - **[`discovery`]** - discovery document model and loaders
//! - **[`request`]** - transport seam and the bounded request queue
//! - **[`generator`]** - type mapping, view models, templates, per-API and fleet generation
//! - **[`error`]** - error kinds surfaced by generation
//! - **[`logging`]** - tracing subscriber setup
//! - **[`runtime_config`]** - environment configuration
//! - **[`cli`]** - command line front end
//!
//! ### Generation Flow
//!
//! ```text
//! directory listing ─┬─ ignore list ─► per-API jobs (≤ 10 at once)
//!                    │                    │  each: fetch doc ─► binding + samples
//!                    │                    ▼
//!                    │          request queue (≤ 50 requests in flight)
//!                    ▼
//!        all jobs settled ─► scan output tree ─► packaging files + indexes
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use apigen::generator::{Generator, GeneratorOptions, DEFAULT_DISCOVERY_URL};
//!
//! let generator = Generator::new(GeneratorOptions::default())?;
//! let report = generator
//!     .generate_all(DEFAULT_DISCOVERY_URL, "ignore.json".as_ref())
//!     .await?;
//! assert!(report.is_success());
//! ```

pub mod cli;
pub mod discovery;
pub mod error;
pub mod generator;
pub mod logging;
pub mod request;
pub mod runtime_config;

pub use error::{GenerateError, Result};
pub use generator::{FleetReport, Generator, GeneratorOptions};
