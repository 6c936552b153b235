//! Source implementations.

mod env;
mod source;
mod ssm;

pub use env::EnvSource;
pub use source::Source;
pub use ssm::{ParameterStore, SsmSource};

#[cfg(feature = "aws")]
pub use ssm::SsmClient;
