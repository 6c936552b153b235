//! Field descriptors: the declarative annotation table for a record type.
//!
//! A [`Schema`] is registered once per record type and plays the role struct
//! tags play in annotation-driven loaders: each [`Field`] names the record
//! field, its primitive kind, its per-source annotations, and an optional
//! default. The typed constructors install a writer closure that puts the
//! coerced value back into the record.

use crate::core::coerce::{FieldKind, Value};

/// Writer closure that stores a coerced value into the record.
pub(crate) type Writer<T> = Box<dyn Fn(&mut T, Value) + Send + Sync>;

/// Descriptor for one bindable field of a record type `T`.
///
/// # Examples
///
/// ```rust
/// use sourcebind::core::Field;
///
/// struct AppConfig {
///     port: u16,
/// }
///
/// let field = Field::u16("port", |c: &mut AppConfig, v| c.port = v)
///     .with_tag("env", "PORT")
///     .with_default("8080");
/// assert_eq!(field.name(), "port");
/// ```
pub struct Field<T: ?Sized> {
    name: &'static str,
    kind: FieldKind,
    tags: Vec<(&'static str, String)>,
    default: Option<String>,
    write: Option<Writer<T>>,
}

impl<T> Field<T> {
    fn with_writer(name: &'static str, kind: FieldKind, write: Writer<T>) -> Self {
        Self {
            name,
            kind,
            tags: Vec::new(),
            default: None,
            write: Some(write),
        }
    }

    /// A string field.
    pub fn string(name: &'static str, set: impl Fn(&mut T, String) + Send + Sync + 'static) -> Self {
        Self::with_writer(
            name,
            FieldKind::Str,
            Box::new(move |target, value| {
                if let Value::Str(v) = value {
                    set(target, v);
                }
            }),
        )
    }

    /// A boolean field.
    pub fn boolean(name: &'static str, set: impl Fn(&mut T, bool) + Send + Sync + 'static) -> Self {
        Self::with_writer(
            name,
            FieldKind::Bool,
            Box::new(move |target, value| {
                if let Value::Bool(v) = value {
                    set(target, v);
                }
            }),
        )
    }

    /// A signed 8-bit integer field.
    pub fn i8(name: &'static str, set: impl Fn(&mut T, i8) + Send + Sync + 'static) -> Self {
        Self::with_writer(
            name,
            FieldKind::I8,
            Box::new(move |target, value| {
                if let Value::Int(v) = value {
                    set(target, v as i8);
                }
            }),
        )
    }

    /// A signed 16-bit integer field.
    pub fn i16(name: &'static str, set: impl Fn(&mut T, i16) + Send + Sync + 'static) -> Self {
        Self::with_writer(
            name,
            FieldKind::I16,
            Box::new(move |target, value| {
                if let Value::Int(v) = value {
                    set(target, v as i16);
                }
            }),
        )
    }

    /// A signed 32-bit integer field.
    pub fn i32(name: &'static str, set: impl Fn(&mut T, i32) + Send + Sync + 'static) -> Self {
        Self::with_writer(
            name,
            FieldKind::I32,
            Box::new(move |target, value| {
                if let Value::Int(v) = value {
                    set(target, v as i32);
                }
            }),
        )
    }

    /// A signed 64-bit integer field.
    pub fn i64(name: &'static str, set: impl Fn(&mut T, i64) + Send + Sync + 'static) -> Self {
        Self::with_writer(
            name,
            FieldKind::I64,
            Box::new(move |target, value| {
                if let Value::Int(v) = value {
                    set(target, v);
                }
            }),
        )
    }

    /// An unsigned 8-bit integer field.
    pub fn u8(name: &'static str, set: impl Fn(&mut T, u8) + Send + Sync + 'static) -> Self {
        Self::with_writer(
            name,
            FieldKind::U8,
            Box::new(move |target, value| {
                if let Value::Uint(v) = value {
                    set(target, v as u8);
                }
            }),
        )
    }

    /// An unsigned 16-bit integer field.
    pub fn u16(name: &'static str, set: impl Fn(&mut T, u16) + Send + Sync + 'static) -> Self {
        Self::with_writer(
            name,
            FieldKind::U16,
            Box::new(move |target, value| {
                if let Value::Uint(v) = value {
                    set(target, v as u16);
                }
            }),
        )
    }

    /// An unsigned 32-bit integer field.
    pub fn u32(name: &'static str, set: impl Fn(&mut T, u32) + Send + Sync + 'static) -> Self {
        Self::with_writer(
            name,
            FieldKind::U32,
            Box::new(move |target, value| {
                if let Value::Uint(v) = value {
                    set(target, v as u32);
                }
            }),
        )
    }

    /// An unsigned 64-bit integer field.
    pub fn u64(name: &'static str, set: impl Fn(&mut T, u64) + Send + Sync + 'static) -> Self {
        Self::with_writer(
            name,
            FieldKind::U64,
            Box::new(move |target, value| {
                if let Value::Uint(v) = value {
                    set(target, v);
                }
            }),
        )
    }

    /// A field with a caller-supplied kind and writer.
    ///
    /// Pair with [`Coercions::with_rule`](crate::core::Coercions::with_rule)
    /// to bind kinds outside the built-in set; the writer receives whatever
    /// [`Value`] the installed rule produces.
    pub fn custom(
        name: &'static str,
        kind: FieldKind,
        write: impl Fn(&mut T, Value) + Send + Sync + 'static,
    ) -> Self {
        Self::with_writer(name, kind, Box::new(write))
    }

    /// A descriptor without a writer.
    ///
    /// Matched annotations on such a field fail the load with
    /// `UnsettableField`; use it to declare a field the engine must not
    /// bind yet.
    pub fn declare(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            tags: Vec::new(),
            default: None,
            write: None,
        }
    }

    /// Declare an annotation for the given source identifier.
    ///
    /// `raw` uses the `"<name>[,<flag>]*"` syntax; an empty name falls back
    /// to the field identifier. Order of declaration is irrelevant — the
    /// engine queries sources in *its own* registration order.
    pub fn with_tag(mut self, source: &'static str, raw: impl Into<String>) -> Self {
        self.tags.push((source, raw.into()));
        self
    }

    /// Supply a fallback value, applied only when no source produced one.
    ///
    /// An *empty* default is meaningful: it marks the field satisfied and
    /// leaves it at its zero value. This is the canonical way to make a
    /// field optional.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// The field identifier (also the fallback lookup name).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The field's primitive kind.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The raw annotation declared for a source identifier, if any.
    pub fn tag_for(&self, source_id: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(id, _)| *id == source_id)
            .map(|(_, raw)| raw.as_str())
    }

    /// The declared default, if any.
    pub(crate) fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub(crate) fn writer(&self) -> Option<&Writer<T>> {
        self.write.as_ref()
    }
}

impl<T> std::fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("tags", &self.tags)
            .field("default", &self.default)
            .field("settable", &self.write.is_some())
            .finish()
    }
}

/// The ordered field-descriptor table for a record type `T`.
///
/// # Examples
///
/// ```rust
/// use sourcebind::core::{Field, Schema};
///
/// #[derive(Default)]
/// struct AppConfig {
///     port: u16,
///     debug: bool,
/// }
///
/// let schema = Schema::builder()
///     .with_field(
///         Field::u16("port", |c: &mut AppConfig, v| c.port = v)
///             .with_tag("env", "PORT")
///             .with_default("8080"),
///     )
///     .with_field(
///         Field::boolean("debug", |c: &mut AppConfig, v| c.debug = v)
///             .with_tag("env", "DEBUG")
///             .with_default("false"),
///     )
///     .build();
/// assert_eq!(schema.len(), 2);
/// ```
pub struct Schema<T: ?Sized> {
    fields: Vec<Field<T>>,
}

impl<T> Schema<T> {
    /// Create a new schema builder.
    pub fn builder() -> SchemaBuilder<T> {
        SchemaBuilder { fields: Vec::new() }
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The declared fields, in declaration order.
    pub fn fields(&self) -> &[Field<T>] {
        &self.fields
    }
}

impl<T> std::fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema").field("fields", &self.fields).finish()
    }
}

/// Builder accumulating [`Field`] descriptors for a record type.
pub struct SchemaBuilder<T: ?Sized> {
    fields: Vec<Field<T>>,
}

impl<T> SchemaBuilder<T> {
    /// Add a field descriptor. Fields resolve in declaration order.
    pub fn with_field(mut self, field: Field<T>) -> Self {
        self.fields.push(field);
        self
    }

    /// Finish the schema.
    pub fn build(self) -> Schema<T> {
        Schema { fields: self.fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Record {
        name: String,
        count: i32,
    }

    #[test]
    fn test_builder_accumulates_fields_in_order() {
        let schema = Schema::builder()
            .with_field(Field::string("name", |r: &mut Record, v| r.name = v))
            .with_field(Field::i32("count", |r: &mut Record, v| r.count = v))
            .build();

        assert_eq!(schema.len(), 2);
        assert_eq!(schema.fields()[0].name(), "name");
        assert_eq!(schema.fields()[1].name(), "count");
    }

    #[test]
    fn test_tag_lookup_by_source_id() {
        let field = Field::string("name", |r: &mut Record, v| r.name = v)
            .with_tag("env", "NAME")
            .with_tag("ssm", "svc/name,secure");

        assert_eq!(field.tag_for("env"), Some("NAME"));
        assert_eq!(field.tag_for("ssm"), Some("svc/name,secure"));
        assert_eq!(field.tag_for("vault"), None);
    }

    #[test]
    fn test_declared_field_has_no_writer() {
        let field: Field<Record> = Field::declare("name", FieldKind::Str);
        assert!(field.writer().is_none());
    }

    #[test]
    fn test_writer_stores_value() {
        let field = Field::i32("count", |r: &mut Record, v| r.count = v);
        let mut record = Record::default();
        field.writer().unwrap()(&mut record, Value::Int(7));
        assert_eq!(record.count, 7);
    }

    #[test]
    fn test_empty_default_is_distinct_from_no_default() {
        let with_empty = Field::string("name", |r: &mut Record, v| r.name = v).with_default("");
        let without = Field::string("name", |r: &mut Record, v| r.name = v);

        assert_eq!(with_empty.default_value(), Some(""));
        assert_eq!(without.default_value(), None);
    }
}
