//! Error types for sourcebind.

/// Result type alias for sourcebind operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors reported by [`Loader::load`](crate::core::Loader::load).
///
/// A backend that simply has no value for a key is *not* an error: sources
/// normalize absence to an empty string so that default and optional policy
/// apply uniformly. Every variant here is fatal to the current load.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The schema handed to `load` declares no bindable fields.
    #[error("target schema declares no bindable fields")]
    InvalidTarget,

    /// A field matched by a source has no writer installed.
    #[error("field '{0}' cannot be written")]
    UnsettableField(String),

    /// A field matched by a source has a kind with no coercion rule.
    #[error("field '{field}' has unsupported type {type_name}")]
    UnsupportedFieldType {
        /// The field identifier
        field: String,
        /// Display name of the unsupported type
        type_name: String,
    },

    /// A source backend signaled a hard failure while resolving a field.
    #[error("failed to load field '{field}' from source '{source}'")]
    SourceLookup {
        /// The field identifier
        field: String,
        /// Identifier of the source that failed
        source: String,
        /// The underlying failure
        #[source]
        cause: SourceError,
    },

    /// A required field has no value after all sources and defaults.
    #[error("missing value for field '{field}'")]
    MissingValue {
        /// The field identifier
        field: String,
    },

    /// A resolved value could not be converted to the field's kind.
    #[error("invalid value for field '{field}'")]
    Coercion {
        /// The field identifier
        field: String,
        /// The underlying conversion failure
        #[source]
        cause: CoerceError,
    },
}

/// Hard failures reported by a [`Source`](crate::sources::Source).
///
/// "Key not present" is never a `SourceError`; sources return an empty
/// string for that case.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// A `$token` in a parameter name has no entry in the substitution map.
    #[error("no substitution for token '${token}' in parameter name '{name}'")]
    UnresolvedToken {
        /// The token that could not be substituted (without the `$`)
        token: String,
        /// The parameter name being templated
        name: String,
    },

    /// The backend rejected the request (network, auth, malformed request).
    #[error("backend request failed: {0}")]
    Backend(String),
}

/// Failures converting a resolved string into a field's primitive kind.
///
/// Boolean and string coercion are total; only integer kinds can fail. The
/// wrapped [`std::num::ParseIntError`] distinguishes invalid syntax from
/// out-of-range values via its `kind()`.
#[derive(Debug, thiserror::Error)]
pub enum CoerceError {
    /// The raw value is not a valid base-10 integer at the declared width.
    #[error("invalid integer '{raw}'")]
    Int {
        /// The raw string that failed to parse
        raw: String,
        /// The parse failure
        #[source]
        cause: std::num::ParseIntError,
    },
}
