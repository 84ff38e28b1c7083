//! The template config aggregate: schema metadata plus the ordered variable set.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::registry::{KindRegistry, Transformer, Validator};
use crate::variable::TemplateVariable;
use crate::version::{parse_range, parse_version};

/// File name of the schema document inside a template tree.
pub const CONFIG_FILE_NAME: &str = "formwork.yaml";

/// A loaded template schema: metadata, the ordered variable set, and the
/// override tables.
///
/// `Clone` is the deep-copy operation: the clone owns fresh variable entries
/// and fresh override maps, so mutating a clone never affects the original.
/// A config and its variables belong to one render pipeline at a time;
/// parallel pipelines must clone first.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    #[serde(default)]
    pub template_name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "type")]
    pub config_type: String,
    /// Range of template versions this schema supports.
    #[serde(default)]
    pub versions: String,
    #[serde(default)]
    pub default_version: String,
    /// Declaration order is preserved; names are unique.
    #[serde(default)]
    pub variables: Vec<TemplateVariable>,
    /// Output file renames applied at write time.
    #[serde(default, rename = "filenameOverrideMap")]
    pub filename_overrides: HashMap<String, String>,

    #[serde(skip)]
    validators: HashMap<String, Validator>,
    #[serde(skip)]
    transformers: HashMap<String, Transformer>,
    #[serde(skip)]
    registry: KindRegistry,
}

impl TemplateConfig {
    /// Load a schema document from a file.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        debug!("loading template config from {:?}", path);
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a schema document and enforce the default-version invariant.
    pub fn parse(content: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.check_default_version()?;
        Ok(config)
    }

    /// A non-empty default version must satisfy the supported range.
    fn check_default_version(&self) -> ConfigResult<()> {
        if self.default_version.is_empty() {
            return Ok(());
        }
        let version = parse_version(&self.default_version)?;
        let range = parse_range(&self.versions).map_err(|e| ConfigError::InvalidVersionRange {
            range: self.versions.clone(),
            message: e.to_string(),
        })?;
        if !range.matches(&version) {
            return Err(ConfigError::VersionOutOfRange {
                version: self.default_version.clone(),
                range: self.versions.clone(),
            });
        }
        Ok(())
    }

    /// Look up a variable by name.
    pub fn get_variable(&self, name: &str) -> ConfigResult<&TemplateVariable> {
        self.variables
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| ConfigError::VariableNotFound(name.to_string()))
    }

    /// Read a variable's value through its kind's validator and transformer.
    ///
    /// Both run on every read; nothing is cached. Returns the transformed
    /// value.
    pub fn get_variable_value(&self, name: &str) -> ConfigResult<String> {
        let variable = self.get_variable(name)?;
        if variable.value.is_empty() {
            return Err(ConfigError::EmptyValue(name.to_string()));
        }

        let validate = self.validator(&variable.kind);
        validate(&variable.value).map_err(|message| ConfigError::ValidationFailed {
            variable: name.to_string(),
            message,
        })?;

        let transform = self.transformer(&variable.kind);
        transform(&variable.value).map_err(|message| ConfigError::TransformationFailed {
            variable: name.to_string(),
            message,
        })
    }

    /// Upsert a variable value. Validation is deferred to read time.
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.variables.iter_mut().find(|v| v.name == name) {
            Some(variable) => variable.value = value,
            None => self.variables.push(TemplateVariable {
                name,
                value,
                ..TemplateVariable::default()
            }),
        }
    }

    /// Bulk upsert, used by outer layers that collect variables as a map.
    pub fn set_variables_from_map(&mut self, values: &BTreeMap<String, String>) {
        for (name, value) in values {
            debug!("setting variable {name}={value}");
            self.set_variable(name.clone(), value.clone());
        }
    }

    /// Example values per variable, for variables that declare any.
    pub fn variable_example_values(&self) -> BTreeMap<String, Vec<String>> {
        self.variables
            .iter()
            .filter(|v| !v.example_values.is_empty())
            .map(|v| (v.name.clone(), v.example_values.clone()))
            .collect()
    }

    /// Raw name-to-value map; the substitution context for rendering.
    pub fn variable_map(&self) -> BTreeMap<String, String> {
        self.variables
            .iter()
            .map(|v| (v.name.clone(), v.value.clone()))
            .collect()
    }

    /// Validator for a kind: caller overrides first, then builtins.
    pub fn validator(&self, kind: &str) -> Validator {
        if let Some(validator) = self.validators.get(kind) {
            return Arc::clone(validator);
        }
        self.registry.validator(kind)
    }

    /// Transformer for a kind: caller overrides first, then builtins.
    pub fn transformer(&self, kind: &str) -> Transformer {
        if let Some(transformer) = self.transformers.get(kind) {
            return Arc::clone(transformer);
        }
        self.registry.transformer(kind)
    }

    /// Register a caller-side validator override for a kind.
    pub fn set_validator(&mut self, kind: impl Into<String>, validator: Validator) {
        self.validators.insert(kind.into(), validator);
    }

    /// Register a caller-side transformer override for a kind.
    pub fn set_transformer(&mut self, kind: impl Into<String>, transformer: Transformer) {
        self.transformers.insert(kind.into(), transformer);
    }

    /// Rename an output file at write time.
    pub fn set_filename_override(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.filename_overrides.insert(from.into(), to.into());
    }

    /// Output name for a rendered file after applying the override table.
    pub fn output_file_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.filename_overrides
            .get(name)
            .map(String::as_str)
            .unwrap_or(name)
    }

    /// Replace the builtin kind registry, for tests and embedders.
    pub fn with_registry(mut self, registry: KindRegistry) -> Self {
        self.registry = registry;
        self
    }
}

impl fmt::Debug for TemplateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateConfig")
            .field("template_name", &self.template_name)
            .field("display_name", &self.display_name)
            .field("config_type", &self.config_type)
            .field("versions", &self.versions)
            .field("default_version", &self.default_version)
            .field("variables", &self.variables)
            .field("filename_overrides", &self.filename_overrides)
            .field("validator_overrides", &self.validators.keys())
            .field("transformer_overrides", &self.transformers.keys())
            .finish()
    }
}
