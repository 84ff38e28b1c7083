//! Default-value resolution: chained references and version gating.

use tracing::info;

use crate::config::TemplateConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::variable::TemplateVariable;
use crate::version::{parse_range, parse_version};

impl TemplateConfig {
    /// Apply defaults to every unset variable, ignoring version windows.
    ///
    /// Idempotent: variables that already carry a value are untouched.
    pub fn apply_default_variables(&mut self) -> ConfigResult<()> {
        for idx in 0..self.variables.len() {
            if !self.variables[idx].is_unset() {
                continue;
            }
            let value = self.resolve_default(idx)?;
            info!(
                "variable {} defaulting to value {}",
                self.variables[idx].name, value
            );
            self.variables[idx].value = value;
        }
        Ok(())
    }

    /// Apply defaults to unset variables whose version window admits
    /// `version`.
    ///
    /// Variables whose window excludes the target version are skipped and
    /// stay unset; reading or rendering one later is where that surfaces.
    pub fn apply_default_variables_for_version(&mut self, version: &str) -> ConfigResult<()> {
        let target = parse_version(version)?;

        let supported =
            parse_range(&self.versions).map_err(|e| ConfigError::InvalidVersionRange {
                range: self.versions.clone(),
                message: e.to_string(),
            })?;
        if !supported.matches(&target) {
            return Err(ConfigError::VersionOutOfRange {
                version: version.to_string(),
                range: self.versions.clone(),
            });
        }

        for idx in 0..self.variables.len() {
            if !self.variables[idx].is_unset() {
                continue;
            }

            let variable = &self.variables[idx];
            let window =
                parse_range(&variable.versions).map_err(|e| ConfigError::InvalidVariableRange {
                    variable: variable.name.clone(),
                    range: variable.versions.clone(),
                    message: e.to_string(),
                })?;
            if !window.matches(&target) {
                info!(
                    "variable {} versions {} exclude {}, skipping",
                    variable.name, variable.versions, version
                );
                continue;
            }

            let value = self.resolve_default(idx)?;
            info!(
                "variable {} defaulting to value {}",
                self.variables[idx].name, value
            );
            self.variables[idx].value = value;
        }
        Ok(())
    }

    /// Resolve the default for the unset variable at `idx`: reference chain
    /// first, inline value second, error third.
    fn resolve_default(&self, idx: usize) -> ConfigResult<String> {
        let variable = &self.variables[idx];

        let mut resolved = String::new();
        if !variable.default.reference_var.is_empty() {
            let first = self.get_variable(&variable.default.reference_var)?;
            resolved = self.follow_reference_chain(&variable.name, first)?;
        }

        if resolved.is_empty() {
            resolved = variable.default.value.clone();
        }

        if resolved.is_empty() {
            return Err(ConfigError::NoDefaultValue(variable.name.clone()));
        }
        Ok(resolved)
    }

    /// Walk a reference chain for `origin` until a candidate yields a value.
    ///
    /// At each hop: a candidate with a value terminates the chain with it, a
    /// candidate with its own reference continues, anything else terminates
    /// with the candidate's inline default (possibly empty). A hop after the
    /// first that revisits `origin` is a cyclical reference. Cycles among
    /// intermediate variables that never revisit `origin` are not detected
    /// by that rule; the hop bound cuts them off and the chain yields no
    /// value.
    fn follow_reference_chain(
        &self,
        origin: &str,
        first: &TemplateVariable,
    ) -> ConfigResult<String> {
        let max_hops = self.variables.len() + 1;
        let mut current = first;
        let mut first_hop = true;

        for _ in 0..max_hops {
            if !first_hop && current.name == origin {
                return Err(ConfigError::CyclicalReference(origin.to_string()));
            }
            first_hop = false;

            if !current.value.is_empty() {
                return Ok(current.value.clone());
            }
            if current.default.reference_var.is_empty() {
                return Ok(current.default.value.clone());
            }
            current = self.get_variable(&current.default.reference_var)?;
        }

        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::VariableDefault;

    fn variable(name: &str) -> TemplateVariable {
        TemplateVariable {
            name: name.to_string(),
            versions: ">=1.0.0".to_string(),
            ..TemplateVariable::default()
        }
    }

    fn with_inline(mut v: TemplateVariable, value: &str) -> TemplateVariable {
        v.default.value = value.to_string();
        v
    }

    fn with_reference(mut v: TemplateVariable, target: &str) -> TemplateVariable {
        v.default.reference_var = target.to_string();
        v
    }

    fn config_with(variables: Vec<TemplateVariable>) -> TemplateConfig {
        let mut config = TemplateConfig::default();
        config.versions = ">=1.0.0 <3.0.0".to_string();
        config.variables = variables;
        config
    }

    #[test]
    fn inline_default_applies_once_and_is_idempotent() {
        let mut config = config_with(vec![with_inline(variable("PORT"), "8080")]);

        config.apply_default_variables().unwrap();
        assert_eq!(config.get_variable("PORT").unwrap().value, "8080");

        config.set_variable("PORT", "9090");
        config.apply_default_variables().unwrap();
        assert_eq!(config.get_variable("PORT").unwrap().value, "9090");
    }

    #[test]
    fn explicit_value_wins_over_default() {
        let mut config = config_with(vec![with_inline(variable("PORT"), "8080")]);
        config.set_variable("PORT", "3000");
        config.apply_default_variables().unwrap();
        assert_eq!(config.get_variable("PORT").unwrap().value, "3000");
    }

    #[test]
    fn chain_resolves_through_two_references() {
        // A -> B -> C, only C has an inline default.
        let mut config = config_with(vec![
            with_reference(variable("A"), "B"),
            with_reference(variable("B"), "C"),
            with_inline(variable("C"), "x"),
        ]);

        config.apply_default_variables().unwrap();
        assert_eq!(config.get_variable("A").unwrap().value, "x");
    }

    #[test]
    fn chain_stops_at_first_set_value() {
        let mut config = config_with(vec![
            with_reference(variable("A"), "B"),
            with_reference(variable("B"), "C"),
            with_inline(variable("C"), "x"),
        ]);
        config.set_variable("B", "set-on-b");

        config.apply_default_variables().unwrap();
        assert_eq!(config.get_variable("A").unwrap().value, "set-on-b");
    }

    #[test]
    fn chain_back_to_origin_is_cyclical() {
        // A -> B -> A revisits the variable being resolved.
        let mut config = config_with(vec![
            with_reference(variable("A"), "B"),
            with_reference(variable("B"), "A"),
        ]);

        let err = config.apply_default_variables().unwrap_err();
        assert!(matches!(err, ConfigError::CyclicalReference(name) if name == "A"));
    }

    #[test]
    fn self_reference_is_cyclical() {
        let mut config = config_with(vec![with_reference(variable("A"), "A")]);
        let err = config.apply_default_variables().unwrap_err();
        assert!(matches!(err, ConfigError::CyclicalReference(name) if name == "A"));
    }

    #[test]
    fn intermediate_cycle_is_not_reported_as_cyclical() {
        // A -> B -> C -> B loops without ever revisiting A. The chain rule
        // only watches for the origin, so this exhausts the hop bound and
        // falls through to the no-default error.
        let mut config = config_with(vec![
            with_reference(variable("A"), "B"),
            with_reference(variable("B"), "C"),
            with_reference(variable("C"), "B"),
        ]);

        let err = config.apply_default_variables().unwrap_err();
        assert!(matches!(err, ConfigError::NoDefaultValue(name) if name == "A"));
    }

    #[test]
    fn intermediate_cycle_with_inline_fallback_uses_it() {
        let mut config = config_with(vec![
            with_inline(with_reference(variable("A"), "B"), "fallback"),
            with_reference(variable("B"), "C"),
            with_reference(variable("C"), "B"),
        ]);

        // A's exhausted chain falls back to its inline value; the apply then
        // moves on to B, whose chain does revisit its own origin.
        let err = config.apply_default_variables().unwrap_err();
        assert!(matches!(err, ConfigError::CyclicalReference(name) if name == "B"));
        assert_eq!(config.get_variable("A").unwrap().value, "fallback");
    }

    #[test]
    fn empty_chain_result_falls_back_to_inline() {
        // B yields nothing (no value, no reference, no inline default) and
        // its own window excludes the target version, so only A resolves:
        // the empty chain result falls back to A's inline value.
        let mut gated = variable("B");
        gated.versions = ">=9.0.0".to_string();
        let mut config = config_with(vec![
            with_inline(with_reference(variable("A"), "B"), "inline"),
            gated,
        ]);

        config.apply_default_variables_for_version("1.5.0").unwrap();
        assert_eq!(config.get_variable("A").unwrap().value, "inline");
        assert!(config.get_variable("B").unwrap().value.is_empty());
    }

    #[test]
    fn reference_to_missing_variable_is_not_found() {
        let mut config = config_with(vec![with_reference(variable("A"), "GHOST")]);
        let err = config.apply_default_variables().unwrap_err();
        assert!(matches!(err, ConfigError::VariableNotFound(name) if name == "GHOST"));
    }

    #[test]
    fn no_default_anywhere_errors_with_variable_name() {
        let mut config = config_with(vec![variable("LONELY")]);
        let err = config.apply_default_variables().unwrap_err();
        assert!(matches!(err, ConfigError::NoDefaultValue(name) if name == "LONELY"));
    }

    #[test]
    fn for_version_skips_out_of_window_variables() {
        let mut gated = with_inline(variable("NEW_FLAG"), "on");
        gated.versions = ">=2.0.0".to_string();
        let mut config = config_with(vec![with_inline(variable("PORT"), "8080"), gated]);

        config.apply_default_variables_for_version("1.5.0").unwrap();
        assert_eq!(config.get_variable("PORT").unwrap().value, "8080");
        assert!(config.get_variable("NEW_FLAG").unwrap().value.is_empty());
    }

    #[test]
    fn for_version_rejects_malformed_version_before_touching_variables() {
        let mut config = config_with(vec![with_inline(variable("PORT"), "8080")]);
        let err = config
            .apply_default_variables_for_version("not-a-version")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVersion { .. }));
        assert!(config.get_variable("PORT").unwrap().value.is_empty());
    }

    #[test]
    fn for_version_rejects_version_outside_config_range() {
        let mut config = config_with(vec![with_inline(variable("PORT"), "8080")]);
        let err = config
            .apply_default_variables_for_version("5.0.0")
            .unwrap_err();
        assert!(matches!(err, ConfigError::VersionOutOfRange { .. }));
        assert!(config.get_variable("PORT").unwrap().value.is_empty());
    }

    #[test]
    fn for_version_rejects_malformed_variable_window() {
        let mut broken = with_inline(variable("PORT"), "8080");
        broken.versions = "not a range".to_string();
        let mut config = config_with(vec![broken]);

        let err = config
            .apply_default_variables_for_version("1.5.0")
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidVariableRange { variable, .. } if variable == "PORT")
        );
    }

    #[test]
    fn for_version_resolves_in_window_variables() {
        let mut config = config_with(vec![
            with_reference(variable("A"), "B"),
            with_inline(variable("B"), "x"),
        ]);

        config.apply_default_variables_for_version("1.5.0").unwrap();
        assert_eq!(config.get_variable("A").unwrap().value, "x");
        assert_eq!(config.get_variable("B").unwrap().value, "x");
    }

    #[test]
    fn for_version_is_idempotent() {
        let mut config = config_with(vec![with_inline(variable("PORT"), "8080")]);
        config.apply_default_variables_for_version("1.5.0").unwrap();
        config.apply_default_variables_for_version("1.5.0").unwrap();
        assert_eq!(config.get_variable("PORT").unwrap().value, "8080");
    }

    #[test]
    fn disable_prompt_does_not_affect_resolution() {
        let mut config = config_with(vec![TemplateVariable {
            name: "REGION".to_string(),
            versions: ">=1.0.0".to_string(),
            default: VariableDefault {
                disable_prompt: true,
                value: "eu-west-1".to_string(),
                ..VariableDefault::default()
            },
            ..TemplateVariable::default()
        }]);

        config.apply_default_variables().unwrap();
        assert_eq!(config.get_variable("REGION").unwrap().value, "eu-west-1");
    }
}
