//! # Generator Module
//!
//! Turns discovery documents into a TypeScript client library: one binding
//! file per API version, one usage sample per method, and the packaging and
//! index files that tie the APIs together.
//!
//! ## Overview
//!
//! ```text
//! discovery doc → RestDescription → view models → askama templates → files
//! ```
//!
//! - **Type mapping** ([`map_type`]) turns schema items into TypeScript type expressions
//! - **Parameter helpers** ([`params`]) sanitize names and humanize path patterns
//! - **Examples** ([`flatten_schema`]) build the shallow request/response examples used in samples
//! - **Method collection** ([`collect_methods`]) walks the resource tree
//! - **Templates** ([`templates`]) hold one explicit context struct per output file
//! - **Per-API generation** ([`Generator::generate_api`])
//! - **Fleet generation** ([`Generator::generate_all`]) and aggregate index regeneration
//!
//! ## Generated Structure
//!
//! ```text
//! index.ts                    # repository root index
//! src/apis/
//! ├── index.ts                # all APIs
//! └── drive/
//!     ├── index.ts            # version selector
//!     ├── package.json
//!     ├── README.md
//!     ├── tsconfig.json
//!     ├── webpack.config.js
//!     ├── v2.ts               # one binding per version
//!     ├── v3.ts
//!     └── samples/
//!         └── v3/
//!             └── drive.files.list.js
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use apigen::generator::{Generator, GeneratorOptions};
//!
//! let generator = Generator::new(GeneratorOptions::default())?;
//! let binding = generator.generate_api("https://www.googleapis.com/discovery/v1/apis/drive/v3/rest").await?;
//! ```
//!
//! One [`Generator`] owns the request queue and the state log for a run.
//! Nothing here is process-global.

mod api;
mod example;
mod fleet;
mod methods;
pub mod params;
mod schema;
mod state;
pub mod templates;

use std::path::{Path, PathBuf};

pub use example::*;
pub use fleet::*;
pub use methods::*;
pub use schema::*;
pub use state::*;

use crate::error::Result;
use crate::request::{HttpTransport, RequestQueue, Transport};

/// Default ceiling for in-flight HTTP requests.
pub const DEFAULT_REQUEST_CONCURRENCY: usize = 50;
/// Default ceiling for concurrent per-API generation jobs.
pub const DEFAULT_API_CONCURRENCY: usize = 10;
/// Public directory of discovery documents.
pub const DEFAULT_DISCOVERY_URL: &str = "https://www.googleapis.com/discovery/v1/apis";

/// Settings for one generator instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Directory that receives one subdirectory per API
    pub output_root: PathBuf,
    /// Repository-root index file; defaults to `index.ts` next to `output_root`
    pub root_index: Option<PathBuf>,
    /// Request the full API list instead of public APIs only
    pub include_private: bool,
    pub request_concurrency: usize,
    pub api_concurrency: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("src/apis"),
            root_index: None,
            include_private: false,
            request_concurrency: DEFAULT_REQUEST_CONCURRENCY,
            api_concurrency: DEFAULT_API_CONCURRENCY,
        }
    }
}

impl GeneratorOptions {
    pub fn with_output_root(mut self, output_root: impl Into<PathBuf>) -> Self {
        self.output_root = output_root.into();
        self
    }

    pub fn root_index_path(&self) -> PathBuf {
        match &self.root_index {
            Some(path) => path.clone(),
            None => self
                .output_root
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join("index.ts"),
        }
    }
}

/// Generator instance context: options, the shared request queue and the
/// per-document state log.
pub struct Generator<T = HttpTransport> {
    options: GeneratorOptions,
    requests: RequestQueue<T>,
    state: StateLog,
}

impl Generator<HttpTransport> {
    /// Generator backed by the real HTTP transport.
    pub fn new(options: GeneratorOptions) -> Result<Self> {
        Ok(Self::with_transport(options, HttpTransport::new()?))
    }
}

impl<T: Transport> Generator<T> {
    pub fn with_transport(options: GeneratorOptions, transport: T) -> Self {
        let requests = RequestQueue::new(transport, options.request_concurrency);
        Self {
            options,
            requests,
            state: StateLog::new(),
        }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn requests(&self) -> &RequestQueue<T> {
        &self.requests
    }

    pub fn state(&self) -> &StateLog {
        &self.state
    }
}
