//! Core resolution types: directives, field descriptors, coercion, loader.

mod coerce;
mod directive;
mod loader;
mod schema;

pub use coerce::{CoerceFn, Coercions, FieldKind, Value};
pub use directive::{Directive, FLAG_OPTIONAL, FLAG_SECURE};
pub use loader::{Loader, LoaderBuilder};
pub use schema::{Field, Schema, SchemaBuilder};
