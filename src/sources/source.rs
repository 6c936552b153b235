//! The source capability trait.

use crate::core::Directive;
use crate::error::SourceError;

/// A named capability that resolves a [`Directive`] to a string value.
///
/// The `identifier` is the annotation namespace a field must declare to be
/// eligible for this source: a field tagged `("env", "PORT")` is only
/// queried by the source whose identifier is `"env"`.
///
/// Implementations must normalize "key not present" to `Ok(String::new())`
/// so the engine can apply default and optional policy uniformly; `Err` is
/// reserved for hard backend failures (network, auth, malformed request).
/// Each call is independent — the engine caches nothing, and imposes no
/// timeout or retry policy of its own.
pub trait Source: Send + Sync {
    /// The annotation namespace this source serves (e.g. `"env"`, `"ssm"`).
    fn identifier(&self) -> &str;

    /// Resolve a directive to a value, or empty string if the key is unset.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] only when the backend signals a hard
    /// failure — never for an absent key.
    fn resolve(&self, directive: &Directive) -> Result<String, SourceError>;
}
