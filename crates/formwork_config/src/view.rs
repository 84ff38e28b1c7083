//! Read-only substitution view over a config.

use std::collections::BTreeMap;

use crate::config::TemplateConfig;
use crate::error::ConfigResult;

/// The substitution context handed to the template engine.
///
/// Owns a deep copy of the config and exposes only the read surface, so
/// template execution can neither observe later mutations nor reach the
/// mutation operations.
#[derive(Debug, Clone)]
pub struct ConfigView {
    config: TemplateConfig,
}

impl ConfigView {
    pub fn new(config: &TemplateConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Validated and transformed read of a variable value.
    pub fn value(&self, name: &str) -> ConfigResult<String> {
        self.config.get_variable_value(name)
    }

    /// Raw values of every variable that has one.
    ///
    /// Unset variables are absent, so a template referencing one hits a
    /// missing-key error instead of a silent blank substitution.
    pub fn raw_values(&self) -> BTreeMap<String, String> {
        self.config
            .variable_map()
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .collect()
    }
}
