//! Primitive kinds and the string-to-value coercion rules.

use crate::error::CoerceError;
use std::collections::HashMap;
use std::num::ParseIntError;
use std::str::FromStr;

/// The primitive kind of a bindable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// UTF-8 string
    Str,
    /// Boolean (`"true"` / `"1"` are true, everything else is false)
    Bool,
    /// Signed 8-bit integer
    I8,
    /// Signed 16-bit integer
    I16,
    /// Signed 32-bit integer
    I32,
    /// Signed 64-bit integer
    I64,
    /// Unsigned 8-bit integer
    U8,
    /// Unsigned 16-bit integer
    U16,
    /// Unsigned 32-bit integer
    U32,
    /// Unsigned 64-bit integer
    U64,
    /// A type with no built-in coercion rule; carries its display name.
    ///
    /// Fields of this kind fail with `UnsupportedFieldType` as soon as a
    /// source matches them, unless a rule was installed via
    /// [`Coercions::with_rule`].
    Other(&'static str),
}

impl FieldKind {
    /// Display name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Str => "string",
            FieldKind::Bool => "bool",
            FieldKind::I8 => "i8",
            FieldKind::I16 => "i16",
            FieldKind::I32 => "i32",
            FieldKind::I64 => "i64",
            FieldKind::U8 => "u8",
            FieldKind::U16 => "u16",
            FieldKind::U32 => "u32",
            FieldKind::U64 => "u64",
            FieldKind::Other(name) => name,
        }
    }
}

/// A coerced value on its way into a field writer.
///
/// Narrow integer kinds range-check during coercion and travel widened;
/// the typed `Field` constructors narrow them back on write.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A string value
    Str(String),
    /// A boolean value
    Bool(bool),
    /// A signed integer, widened to 64 bits
    Int(i64),
    /// An unsigned integer, widened to 64 bits
    Uint(u64),
}

/// A coercion rule: converts a resolved raw string into a [`Value`].
pub type CoerceFn = fn(&str) -> Result<Value, CoerceError>;

/// Immutable table of coercion rules, keyed by [`FieldKind`].
///
/// Constructed once and handed to the [`Loader`](crate::core::Loader);
/// there is no global registry.
///
/// # Examples
///
/// ```rust
/// use sourcebind::core::{Coercions, FieldKind, Value};
///
/// let coercions = Coercions::standard()
///     .with_rule(FieldKind::Other("Upper"), |raw| {
///         Ok(Value::Str(raw.to_uppercase()))
///     });
/// assert!(coercions.rule(FieldKind::Other("Upper")).is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Coercions {
    rules: HashMap<FieldKind, CoerceFn>,
}

impl Coercions {
    /// The standard rule set covering every built-in [`FieldKind`].
    pub fn standard() -> Self {
        let mut rules: HashMap<FieldKind, CoerceFn> = HashMap::new();
        rules.insert(FieldKind::Str, coerce_str);
        rules.insert(FieldKind::Bool, coerce_bool);
        rules.insert(FieldKind::I8, coerce_signed::<i8>);
        rules.insert(FieldKind::I16, coerce_signed::<i16>);
        rules.insert(FieldKind::I32, coerce_signed::<i32>);
        rules.insert(FieldKind::I64, coerce_signed::<i64>);
        rules.insert(FieldKind::U8, coerce_unsigned::<u8>);
        rules.insert(FieldKind::U16, coerce_unsigned::<u16>);
        rules.insert(FieldKind::U32, coerce_unsigned::<u32>);
        rules.insert(FieldKind::U64, coerce_unsigned::<u64>);
        Self { rules }
    }

    /// Add or replace the rule for a kind.
    pub fn with_rule(mut self, kind: FieldKind, rule: CoerceFn) -> Self {
        self.rules.insert(kind, rule);
        self
    }

    /// Look up the rule for a kind, if one exists.
    pub fn rule(&self, kind: FieldKind) -> Option<CoerceFn> {
        self.rules.get(&kind).copied()
    }
}

impl Default for Coercions {
    fn default() -> Self {
        Self::standard()
    }
}

fn coerce_str(raw: &str) -> Result<Value, CoerceError> {
    Ok(Value::Str(raw.to_string()))
}

// Exactly "true" or "1"; any other text is false, never an error.
fn coerce_bool(raw: &str) -> Result<Value, CoerceError> {
    Ok(Value::Bool(raw == "true" || raw == "1"))
}

fn coerce_signed<N>(raw: &str) -> Result<Value, CoerceError>
where
    N: FromStr<Err = ParseIntError> + Into<i64>,
{
    raw.parse::<N>()
        .map(|n| Value::Int(n.into()))
        .map_err(|cause| CoerceError::Int {
            raw: raw.to_string(),
            cause,
        })
}

fn coerce_unsigned<N>(raw: &str) -> Result<Value, CoerceError>
where
    N: FromStr<Err = ParseIntError> + Into<u64>,
{
    raw.parse::<N>()
        .map(|n| Value::Uint(n.into()))
        .map_err(|cause| CoerceError::Int {
            raw: raw.to_string(),
            cause,
        })
}
