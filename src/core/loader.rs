//! The resolution engine: binds schema fields from the configured sources.

use crate::core::coerce::Coercions;
use crate::core::directive::{Directive, FLAG_OPTIONAL};
use crate::core::schema::{Field, Schema};
use crate::error::{ConfigError, Result};
use crate::sources::Source;
use tracing::{debug, trace};

/// Resolves record fields against an ordered list of sources.
///
/// The loader owns a fixed source list and a [`Coercions`] table, both set
/// at construction; it keeps no other state, so a single instance can serve
/// any number of `load` calls and record types.
///
/// # Examples
///
/// ```rust
/// use sourcebind::core::{Field, Loader, Schema};
/// use sourcebind::sources::EnvSource;
///
/// #[derive(Default)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// # fn main() -> sourcebind::error::Result<()> {
/// let schema = Schema::builder()
///     .with_field(
///         Field::u16("port", |c: &mut AppConfig, v| c.port = v)
///             .with_tag(EnvSource::ID, "PORT")
///             .with_default("8080"),
///     )
///     .build();
///
/// let loader = Loader::builder().with_source(EnvSource::new()).build();
///
/// let mut config = AppConfig::default();
/// loader.load(&mut config, &schema)?;
/// # Ok(())
/// # }
/// ```
pub struct Loader {
    sources: Vec<Box<dyn Source>>,
    coercions: Coercions,
}

impl Loader {
    /// Create a new loader builder.
    pub fn builder() -> LoaderBuilder {
        LoaderBuilder::new()
    }

    /// Resolve every field of `schema` and write the results into `target`.
    ///
    /// Fields are processed independently, in declaration order, one source
    /// call at a time. The first error aborts the load; fields already
    /// processed keep their new values, so callers must treat a failed load
    /// as all-or-nothing regardless.
    ///
    /// # Errors
    ///
    /// See [`ConfigError`] for the full taxonomy. A source that merely has
    /// no value for a key never fails the load; only hard backend failures,
    /// missing required values, and coercion failures do.
    pub fn load<T>(&self, target: &mut T, schema: &Schema<T>) -> Result<()> {
        if schema.is_empty() {
            return Err(ConfigError::InvalidTarget);
        }
        for field in schema.fields() {
            self.load_field(target, field)?;
        }
        Ok(())
    }

    fn load_field<T>(&self, target: &mut T, field: &Field<T>) -> Result<()> {
        // A field with no annotation for any configured source is not
        // configuration-managed. Skipped before writability/kind checks.
        if !self
            .sources
            .iter()
            .any(|s| field.tag_for(s.identifier()).is_some())
        {
            trace!(field = field.name(), "no matching source, skipping");
            return Ok(());
        }

        let write = field
            .writer()
            .ok_or_else(|| ConfigError::UnsettableField(field.name().to_string()))?;
        let rule = self.coercions.rule(field.kind()).ok_or_else(|| {
            ConfigError::UnsupportedFieldType {
                field: field.name().to_string(),
                type_name: field.kind().type_name().to_string(),
            }
        })?;

        let mut value = String::new();
        let mut matched = 0usize;
        let mut legacy_optional = false;
        for source in &self.sources {
            let Some(raw) = field.tag_for(source.identifier()) else {
                continue;
            };
            matched += 1;
            let directive = Directive::parse(raw, field.name());
            let resolved =
                source
                    .resolve(&directive)
                    .map_err(|cause| ConfigError::SourceLookup {
                        field: field.name().to_string(),
                        source: source.identifier().to_string(),
                        cause,
                    })?;
            trace!(
                field = field.name(),
                source = source.identifier(),
                found = !resolved.is_empty(),
                "queried source"
            );
            if !resolved.is_empty() {
                // Later sources override earlier ones.
                value = resolved;
            }
            legacy_optional = directive.has_flag(FLAG_OPTIONAL);
        }

        if value.is_empty() {
            match field.default_value() {
                Some(default) => {
                    debug!(field = field.name(), "no source value, applying default");
                    value = default.to_string();
                }
                // The optional flag predates the default mechanism and was
                // only ever honored for fields matched by a single source.
                None if matched == 1 && legacy_optional => {
                    debug!(field = field.name(), "optional and absent, left unset");
                    return Ok(());
                }
                None => {
                    return Err(ConfigError::MissingValue {
                        field: field.name().to_string(),
                    });
                }
            }
        }

        // Satisfied with an empty value (explicit empty default): the field
        // keeps its zero value and the writer is not invoked.
        if value.is_empty() {
            return Ok(());
        }

        let coerced = rule(&value).map_err(|cause| ConfigError::Coercion {
            field: field.name().to_string(),
            cause,
        })?;
        write(target, coerced);
        debug!(field = field.name(), "field bound");
        Ok(())
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<&str> = self.sources.iter().map(|s| s.identifier()).collect();
        f.debug_struct("Loader").field("sources", &ids).finish()
    }
}

/// Builder for constructing a [`Loader`].
pub struct LoaderBuilder {
    sources: Vec<Box<dyn Source>>,
    coercions: Coercions,
}

impl LoaderBuilder {
    /// Create a new builder with the standard coercion rules and no sources.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            coercions: Coercions::standard(),
        }
    }

    /// Add a source.
    ///
    /// Registration order is the resolution order: when several sources
    /// produce a non-empty value for the same field, the last one added
    /// wins.
    pub fn with_source<S: Source + 'static>(mut self, source: S) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Replace the coercion rule table.
    pub fn with_coercions(mut self, coercions: Coercions) -> Self {
        self.coercions = coercions;
        self
    }

    /// Build the loader.
    pub fn build(self) -> Loader {
        Loader {
            sources: self.sources,
            coercions: self.coercions,
        }
    }
}

impl Default for LoaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
