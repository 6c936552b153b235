//! AWS SSM Parameter Store source.
//!
//! Parameter names may be templated: `$token` substrings are substituted
//! from a caller-supplied map before the backend is queried, so one schema
//! can serve several deployment stages (`svc/$stage/api-key`). The `secure`
//! directive flag requests decrypt-on-read for `SecureString` parameters.
//!
//! The backend is reached through the [`ParameterStore`] capability; the
//! `aws` cargo feature supplies [`SsmClient`], an adapter over the official
//! SDK. Tests inject an in-memory store instead.

use super::Source;
use crate::core::{Directive, FLAG_SECURE};
use crate::error::SourceError;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\w+)").expect("valid token regex"));

/// A parameter-store backend.
///
/// `Ok(None)` means the parameter does not exist — the adapter must never
/// surface "not found" as an error, so that the engine's default and
/// optional policy applies uniformly. `Err` is reserved for hard failures
/// (network, auth, malformed request). Implementations own their timeout
/// and retry policy; the engine applies none.
pub trait ParameterStore: Send + Sync {
    /// Fetch a parameter by name, decrypting it when `decrypt` is set.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] for backend failures other than a missing
    /// parameter.
    fn fetch(&self, name: &str, decrypt: bool) -> Result<Option<String>, SourceError>;
}

/// Forward the capability through a shared pointer so callers can keep a
/// handle to the backend (e.g. to inspect recorded requests) while the
/// source owns another clone.
impl<T: ParameterStore + ?Sized> ParameterStore for Arc<T> {
    fn fetch(&self, name: &str, decrypt: bool) -> Result<Option<String>, SourceError> {
        (**self).fetch(name, decrypt)
    }
}

/// Source backed by AWS SSM Parameter Store.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use sourcebind::core::Field;
/// use sourcebind::error::SourceError;
/// use sourcebind::sources::{ParameterStore, SsmSource};
///
/// struct InMemory;
///
/// impl ParameterStore for InMemory {
///     fn fetch(&self, name: &str, _decrypt: bool) -> Result<Option<String>, SourceError> {
///         (name == "svc/prod/api-key").then(|| Ok("k-123".to_string())).transpose()
///     }
/// }
///
/// struct AppConfig {
///     api_key: String,
/// }
///
/// let source = SsmSource::new(InMemory)
///     .with_substitutions(HashMap::from([("stage".to_string(), "prod".to_string())]));
///
/// let field = Field::string("api_key", |c: &mut AppConfig, v| c.api_key = v)
///     .with_tag(SsmSource::ID, "svc/$stage/api-key,secure");
/// ```
pub struct SsmSource {
    store: Box<dyn ParameterStore>,
    substitutions: HashMap<String, String>,
}

impl SsmSource {
    /// The annotation namespace for parameter-store-backed fields.
    pub const ID: &'static str = "ssm";

    /// Create a source over the given backend with no substitutions.
    pub fn new(store: impl ParameterStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            substitutions: HashMap::new(),
        }
    }

    /// Supply the substitution map for `$token` templating.
    ///
    /// A directive name referencing a token absent from this map fails
    /// resolution with [`SourceError::UnresolvedToken`].
    pub fn with_substitutions(mut self, substitutions: HashMap<String, String>) -> Self {
        self.substitutions = substitutions;
        self
    }
}

impl Source for SsmSource {
    fn identifier(&self) -> &str {
        Self::ID
    }

    fn resolve(&self, directive: &Directive) -> Result<String, SourceError> {
        let name = substitute(directive.name(), &self.substitutions)?;
        let decrypt = directive.has_flag(FLAG_SECURE);
        match self.store.fetch(&name, decrypt)? {
            Some(value) => Ok(value),
            // Missing parameters behave exactly like unset environment
            // variables: empty value, no error.
            None => Ok(String::new()),
        }
    }
}

/// Substitute every `$token` in `name` from the substitution map.
fn substitute(
    name: &str,
    substitutions: &HashMap<String, String>,
) -> Result<String, SourceError> {
    let mut out = String::with_capacity(name.len());
    let mut last = 0;
    for m in TOKEN_RE.find_iter(name) {
        let token = &name[m.start() + 1..m.end()];
        let value =
            substitutions
                .get(token)
                .ok_or_else(|| SourceError::UnresolvedToken {
                    token: token.to_string(),
                    name: name.to_string(),
                })?;
        out.push_str(&name[last..m.start()]);
        out.push_str(value);
        last = m.end();
    }
    out.push_str(&name[last..]);
    Ok(out)
}

/// [`ParameterStore`] over the official AWS SDK.
///
/// `Source::resolve` is synchronous while the SDK is async, so calls are
/// bridged onto the ambient tokio runtime when one exists, or a fresh
/// runtime otherwise.
#[cfg(feature = "aws")]
pub struct SsmClient {
    client: aws_sdk_ssm::Client,
}

#[cfg(feature = "aws")]
impl SsmClient {
    /// Wrap an already-configured SDK client.
    pub fn new(client: aws_sdk_ssm::Client) -> Self {
        Self { client }
    }

    /// Build a client from the default AWS configuration chain
    /// (environment, shared config files, instance metadata).
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(aws_sdk_ssm::Client::new(&config))
    }
}

#[cfg(feature = "aws")]
impl ParameterStore for SsmClient {
    fn fetch(&self, name: &str, decrypt: bool) -> Result<Option<String>, SourceError> {
        let request = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(decrypt);

        let response = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle.block_on(request.send()),
            Err(_) => {
                let runtime = tokio::runtime::Runtime::new().map_err(|e| {
                    SourceError::Backend(format!("failed to create runtime: {e}"))
                })?;
                runtime.block_on(request.send())
            }
        };

        match response {
            Ok(output) => Ok(output.parameter.and_then(|p| p.value)),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_parameter_not_found() {
                    Ok(None)
                } else {
                    Err(SourceError::Backend(service_err.to_string()))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingStore {
        values: HashMap<String, String>,
        fail: bool,
        requests: Mutex<Vec<(String, bool)>>,
    }

    impl RecordingStore {
        fn with_value(mut self, name: &str, value: &str) -> Self {
            self.values.insert(name.to_string(), value.to_string());
            self
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn requests(&self) -> Vec<(String, bool)> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl ParameterStore for Arc<RecordingStore> {
        fn fetch(&self, name: &str, decrypt: bool) -> Result<Option<String>, SourceError> {
            self.requests
                .lock()
                .unwrap()
                .push((name.to_string(), decrypt));
            if self.fail {
                return Err(SourceError::Backend("access denied".to_string()));
            }
            Ok(self.values.get(name).cloned())
        }
    }

    #[test]
    fn test_identifier() {
        let source = SsmSource::new(Arc::new(RecordingStore::default()));
        assert_eq!(source.identifier(), "ssm");
    }

    #[test]
    fn test_substitute_passthrough_without_tokens() {
        let subs = HashMap::new();
        assert_eq!(
            substitute("project/prod/ultraSpeed", &subs).unwrap(),
            "project/prod/ultraSpeed"
        );
    }

    #[test]
    fn test_substitute_replaces_all_tokens() {
        let subs = HashMap::from([
            ("stage".to_string(), "prod".to_string()),
            ("feature".to_string(), "ultraSpeed".to_string()),
        ]);
        assert_eq!(
            substitute("project/$stage/$feature", &subs).unwrap(),
            "project/prod/ultraSpeed"
        );
    }

    #[test]
    fn test_substitute_missing_token_fails() {
        let subs = HashMap::new();
        let err = substitute("project/$stage/key", &subs).unwrap_err();
        match err {
            SourceError::UnresolvedToken { token, name } => {
                assert_eq!(token, "stage");
                assert_eq!(name, "project/$stage/key");
            }
            other => panic!("expected UnresolvedToken, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_fetches_templated_name() {
        let store = Arc::new(
            RecordingStore::default().with_value("project/prod/parameter", "parameter_value"),
        );
        let source = SsmSource::new(Arc::clone(&store))
            .with_substitutions(HashMap::from([("stage".to_string(), "prod".to_string())]));

        let directive = Directive::parse("project/$stage/parameter", "field");
        assert_eq!(source.resolve(&directive).unwrap(), "parameter_value");
        assert_eq!(
            store.requests(),
            vec![("project/prod/parameter".to_string(), false)]
        );
    }

    #[test]
    fn test_secure_flag_requests_decryption() {
        let store = Arc::new(RecordingStore::default().with_value("test/parameter/name", "v"));
        let source = SsmSource::new(Arc::clone(&store));

        let directive = Directive::parse("test/parameter/name,secure", "field");
        source.resolve(&directive).unwrap();
        assert_eq!(
            store.requests(),
            vec![("test/parameter/name".to_string(), true)]
        );
    }

    #[test]
    fn test_missing_parameter_is_empty_not_error() {
        let store = Arc::new(RecordingStore::default());
        let source = SsmSource::new(store);

        let directive = Directive::parse("no/such/parameter", "field");
        assert_eq!(source.resolve(&directive).unwrap(), "");
    }

    #[test]
    fn test_backend_failure_propagates() {
        let source = SsmSource::new(Arc::new(RecordingStore::failing()));

        let directive = Directive::parse("test/parameter/name", "field");
        assert!(matches!(
            source.resolve(&directive).unwrap_err(),
            SourceError::Backend(_)
        ));
    }

    #[test]
    fn test_unresolved_token_fails_before_backend_call() {
        let store = Arc::new(RecordingStore::default());
        let source = SsmSource::new(Arc::clone(&store));

        let directive = Directive::parse("svc/$stage/key", "field");
        assert!(matches!(
            source.resolve(&directive).unwrap_err(),
            SourceError::UnresolvedToken { .. }
        ));
        assert!(store.requests().is_empty());
    }
}
