//! Process-environment source.

use super::Source;
use crate::core::Directive;
use crate::error::SourceError;
use std::env;

/// Source backed by the process environment.
///
/// Looks up the directive name as an environment variable. Flags are
/// ignored — the environment has no notion of encryption at rest. An unset
/// variable resolves to the empty string, never an error.
///
/// # Examples
///
/// ```rust
/// use sourcebind::core::Field;
/// use sourcebind::sources::EnvSource;
///
/// struct AppConfig {
///     port: u16,
/// }
///
/// let field = Field::u16("port", |c: &mut AppConfig, v| c.port = v)
///     .with_tag(EnvSource::ID, "PORT");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvSource;

impl EnvSource {
    /// The annotation namespace for environment-backed fields.
    pub const ID: &'static str = "env";

    /// Create a new environment source.
    pub fn new() -> Self {
        Self
    }
}

impl Source for EnvSource {
    fn identifier(&self) -> &str {
        Self::ID
    }

    fn resolve(&self, directive: &Directive) -> Result<String, SourceError> {
        match env::var(directive.name()) {
            Ok(value) => Ok(value),
            Err(env::VarError::NotPresent) => Ok(String::new()),
            Err(err @ env::VarError::NotUnicode(_)) => Err(SourceError::Backend(err.to_string())),
        }
    }
}
