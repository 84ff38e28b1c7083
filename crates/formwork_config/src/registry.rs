//! Builtin validator and transformer catalog.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use regex::Regex;

/// Validation function for a variable kind.
pub type Validator = Arc<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

/// Transformation function for a variable kind.
pub type Transformer = Arc<dyn Fn(&str) -> Result<String, String> + Send + Sync>;

/// Immutable lookup table of builtin validators and transformers.
///
/// Constructed once and injected into each config instance. Kinds without an
/// entry resolve to identity functions: builtins are a closed catalog, not a
/// discovery mechanism.
#[derive(Clone)]
pub struct KindRegistry {
    validators: HashMap<String, Validator>,
    transformers: HashMap<String, Transformer>,
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KindRegistry {
    /// The builtin kind catalog.
    pub fn builtin() -> Self {
        let mut validators: HashMap<String, Validator> = HashMap::new();
        validators.insert("int".into(), Arc::new(validate_int));
        validators.insert("port".into(), Arc::new(validate_port));
        validators.insert("bool".into(), Arc::new(validate_bool));

        // RFC 1123 label: lowercase alphanumerics and dashes, no edge dashes.
        let name_pattern = Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?$").unwrap();
        validators.insert(
            "kubernetesResourceName".into(),
            Arc::new(move |value: &str| {
                if name_pattern.is_match(value) {
                    Ok(())
                } else {
                    Err(format!("{value} is not a valid kubernetes resource name"))
                }
            }),
        );

        let mut transformers: HashMap<String, Transformer> = HashMap::new();
        transformers.insert(
            "kubernetesResourceName".into(),
            Arc::new(|value: &str| Ok(to_resource_name(value))),
        );

        Self {
            validators,
            transformers,
        }
    }

    /// An empty catalog, for tests that exercise fallback behavior.
    pub fn empty() -> Self {
        Self {
            validators: HashMap::new(),
            transformers: HashMap::new(),
        }
    }

    /// Validator for a kind, falling back to a no-op.
    pub fn validator(&self, kind: &str) -> Validator {
        match self.validators.get(kind) {
            Some(validator) => Arc::clone(validator),
            None => Arc::new(|_: &str| Ok(())),
        }
    }

    /// Transformer for a kind, falling back to identity.
    pub fn transformer(&self, kind: &str) -> Transformer {
        match self.transformers.get(kind) {
            Some(transformer) => Arc::clone(transformer),
            None => Arc::new(|value: &str| Ok(value.to_string())),
        }
    }
}

impl fmt::Debug for KindRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindRegistry")
            .field("validators", &self.validators.keys())
            .field("transformers", &self.transformers.keys())
            .finish()
    }
}

fn validate_int(value: &str) -> Result<(), String> {
    value
        .parse::<i64>()
        .map(|_| ())
        .map_err(|_| format!("{value} is not an integer"))
}

fn validate_port(value: &str) -> Result<(), String> {
    match value.parse::<u32>() {
        Ok(port) if (1..=65535).contains(&port) => Ok(()),
        _ => Err(format!("{value} is not a port between 1 and 65535")),
    }
}

fn validate_bool(value: &str) -> Result<(), String> {
    value
        .parse::<bool>()
        .map(|_| ())
        .map_err(|_| format!("{value} is not true or false"))
}

/// Lowercase and replace separators so the result is usable as a resource name.
fn to_resource_name(value: &str) -> String {
    value.to_lowercase().replace(['_', ' ', '.'], "-")
}
