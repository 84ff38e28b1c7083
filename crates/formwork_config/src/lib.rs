//! # formwork_config
//!
//! Variable schema and default resolution for Formwork.
//!
//! A template tree ships a `formwork.yaml` schema document describing its
//! variables: kind, example values, default-resolution rule, and the semver
//! window in which each variable applies. This crate loads that document,
//! lets callers set values, resolves the remaining defaults (chained
//! references with cycle detection), and exposes a validated read surface
//! for rendering.
//!
//! ## Example
//!
//! ```rust,no_run
//! use formwork_config::TemplateConfig;
//!
//! let mut config = TemplateConfig::from_path("templates/webapp/formwork.yaml")?;
//! config.set_variable("APPNAME", "storefront");
//! config.apply_default_variables_for_version("1.2.0")?;
//!
//! let port = config.get_variable_value("PORT")?;
//! # Ok::<(), formwork_config::ConfigError>(())
//! ```

pub mod config;
mod defaults;
pub mod error;
pub mod registry;
pub mod variable;
mod version;
pub mod view;

pub use config::{TemplateConfig, CONFIG_FILE_NAME};
pub use error::{ConfigError, ConfigResult};
pub use registry::{KindRegistry, Transformer, Validator};
pub use variable::{ConditionalReference, TemplateVariable, VariableDefault};
pub use view::ConfigView;
