//! Variable schema entries.

use serde::{Deserialize, Serialize};

/// Default-resolution rule for a variable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDefault {
    /// Skip interactive prompting when a default can be applied.
    #[serde(default)]
    pub disable_prompt: bool,
    /// Name of another variable whose value seeds this one.
    #[serde(default)]
    pub reference_var: String,
    /// Literal fallback when no reference produces a value.
    #[serde(default)]
    pub value: String,
}

/// Reference to a variable whose value can affect validation or
/// transformation of the associated variable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalReference {
    #[serde(default)]
    pub reference_var: String,
}

/// A single schema variable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateVariable {
    pub name: String,
    /// Validation/transformation kind, resolved through the kind registry.
    #[serde(default)]
    pub kind: String,
    /// Descriptive type shown to users; carries no behavior.
    #[serde(default, rename = "type")]
    pub var_type: String,
    /// Current value; empty means unresolved.
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub example_values: Vec<String>,
    #[serde(default)]
    pub description: String,
    /// Semver range in which this variable applies.
    #[serde(default)]
    pub versions: String,
    #[serde(default)]
    pub default: VariableDefault,
    #[serde(default)]
    pub conditional_reference: ConditionalReference,
}

impl TemplateVariable {
    /// A variable is unresolved until a value has been set or defaulted.
    pub fn is_unset(&self) -> bool {
        self.value.is_empty()
    }
}
