//! # sourcebind
//!
//! Bind externally-stored configuration values onto typed fields of an
//! in-memory record, driven by per-field annotations.
//!
//! ## Overview
//!
//! `sourcebind` resolves record fields against an ordered set of sources
//! (process environment, AWS SSM Parameter Store, or anything implementing
//! [`Source`](sources::Source)):
//! - Per-field annotations name the lookup key and modifiers
//!   (`"<name>[,<flag>]*"` — `secure` requests decrypt-on-read)
//! - Later sources override earlier ones; defaults apply only when no
//!   source produced a value
//! - Resolved strings are coerced to the field's primitive kind with
//!   width-checked integer parsing
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sourcebind::prelude::*;
//!
//! #[derive(Debug, Default)]
//! struct AppConfig {
//!     host: String,
//!     port: u16,
//!     debug: bool,
//! }
//!
//! # fn main() -> sourcebind::error::Result<()> {
//! let schema = Schema::builder()
//!     .with_field(
//!         Field::string("host", |c: &mut AppConfig, v| c.host = v)
//!             .with_tag(EnvSource::ID, "HOST"),
//!     )
//!     .with_field(
//!         Field::u16("port", |c: &mut AppConfig, v| c.port = v)
//!             .with_tag(EnvSource::ID, "PORT")
//!             .with_default("8080"),
//!     )
//!     .with_field(
//!         Field::boolean("debug", |c: &mut AppConfig, v| c.debug = v)
//!             .with_tag(EnvSource::ID, "DEBUG")
//!             .with_default("false"),
//!     )
//!     .build();
//!
//! let loader = Loader::builder().with_source(EnvSource::new()).build();
//!
//! let mut config = AppConfig::default();
//! loader.load(&mut config, &schema)?;
//! println!("listening on {}:{}", config.host, config.port);
//! # Ok(())
//! # }
//! ```
//!
//! ## Sources
//!
//! - **Environment** ([`EnvSource`](sources::EnvSource)): reads process
//!   environment variables; unset means empty, never an error.
//! - **SSM Parameter Store** ([`SsmSource`](sources::SsmSource)): resolves
//!   templated parameter names (`svc/$stage/key`), honors the `secure`
//!   flag, and treats a missing parameter like an unset variable. The
//!   AWS-backed client lives behind the `aws` cargo feature:
//!
//! ```toml
//! [dependencies]
//! sourcebind = { version = "0.1", features = ["aws"] }
//! ```
//!
//! ## Resolution rules
//!
//! For each declared field: every configured source with a matching
//! annotation is queried in the order sources were registered, and the
//! last non-empty value wins. If no source produced a value the default
//! applies — an explicitly empty default leaves the field at its zero
//! value. A required field with no value fails the load.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod sources;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{Coercions, Directive, Field, FieldKind, Loader, Schema, Value};
    pub use crate::error::{ConfigError, Result, SourceError};
    pub use crate::sources::{EnvSource, ParameterStore, Source, SsmSource};

    #[cfg(feature = "aws")]
    pub use crate::sources::SsmClient;
}
