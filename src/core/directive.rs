//! Parsed form of a field's per-source annotation.

use std::collections::HashSet;

/// Flag marking a field as permitted to stay unset.
///
/// Deprecated: honored only when exactly one source matches the field.
/// Prefer [`Field::with_default`](crate::core::Field::with_default).
pub const FLAG_OPTIONAL: &str = "optional";

/// Flag requesting decrypt-on-read from backends with encryption at rest.
pub const FLAG_SECURE: &str = "secure";

/// A parsed annotation: a lookup name plus a set of modifier flags.
///
/// The raw syntax is `"<name>[,<flag>]*"`. The flag vocabulary is open:
/// unknown flags are kept in the set and ignored by the engine, so new
/// flags can be introduced without breaking older readers.
///
/// # Examples
///
/// ```rust
/// use sourcebind::core::{Directive, FLAG_SECURE};
///
/// let d = Directive::parse("svc/api-key,secure", "api_key");
/// assert_eq!(d.name(), "svc/api-key");
/// assert!(d.has_flag(FLAG_SECURE));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    name: String,
    flags: HashSet<String>,
}

impl Directive {
    /// Parse a raw annotation, falling back to the field's own identifier
    /// when the name segment is empty.
    ///
    /// Parsing is total: any input produces a directive, never an error.
    /// Flags are trimmed of surrounding whitespace and kept verbatim.
    pub fn parse(raw: &str, fallback_name: &str) -> Self {
        let mut segments = raw.split(',');
        let name = match segments.next() {
            Some("") | None => fallback_name.to_string(),
            Some(name) => name.to_string(),
        };
        let flags = segments.map(|flag| flag.trim().to_string()).collect();
        Self { name, flags }
    }

    /// The lookup name presented to a source.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the annotation carried the given flag.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }
}
