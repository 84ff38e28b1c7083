//! The render pipeline: validate inputs, apply defaults, walk and render.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tera::{Context, Tera, Value};
use tracing::{debug, info};

use formwork_config::{ConfigView, TemplateConfig, CONFIG_FILE_NAME};

use crate::error::{RenderError, RenderResult};
use crate::source::TemplateSource;
use crate::writer::TemplateWriter;

/// Renders a template tree against a resolved config.
///
/// The pipeline is linear with no retries: inputs are validated, defaults
/// are applied for the target version, then every file under the source
/// path is rendered and written. The first error at any stage is terminal;
/// files already written stay written.
pub struct Renderer {
    config: Option<TemplateConfig>,
    source: Option<Box<dyn TemplateSource>>,
    source_path: Option<String>,
    destination: Option<PathBuf>,
    version: Option<String>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            config: None,
            source: None,
            source_path: None,
            destination: None,
            version: None,
        }
    }
}

impl Renderer {
    /// Start a renderer for `config`, seeding the target version from the
    /// config's default version when one is declared.
    pub fn new(config: TemplateConfig) -> Self {
        Self::default().config(config)
    }

    /// Supply the config, seeding the target version from its default
    /// version unless one was already set.
    pub fn config(mut self, config: TemplateConfig) -> Self {
        if self.version.is_none() && !config.default_version.is_empty() {
            debug!("using default version {}", config.default_version);
            self.version = Some(config.default_version.clone());
        }
        self.config = Some(config);
        self
    }

    /// The file tree holding the template files.
    pub fn source(mut self, source: impl TemplateSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Location of the template files within the source tree.
    pub fn source_path(mut self, path: impl Into<String>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    /// Directory rendered files are written under.
    pub fn destination(mut self, dest: impl Into<PathBuf>) -> Self {
        self.destination = Some(dest.into());
        self
    }

    /// Override the target version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// The owned config, e.g. to set variables before rendering.
    pub fn config_mut(&mut self) -> Option<&mut TemplateConfig> {
        self.config.as_mut()
    }

    /// Run the pipeline: validate inputs, apply defaults for the target
    /// version, render and write every file.
    pub fn generate(&mut self, writer: &mut dyn TemplateWriter) -> RenderResult<()> {
        let config = self.config.as_mut().ok_or(RenderError::MissingConfig)?;
        let source_path = self
            .source_path
            .as_deref()
            .ok_or(RenderError::MissingSourcePath)?;
        let destination = self
            .destination
            .as_deref()
            .ok_or(RenderError::MissingDestination)?;
        let source = self.source.as_deref().ok_or(RenderError::MissingSource)?;
        let version = self.version.as_deref().ok_or(RenderError::MissingVersion)?;

        config.apply_default_variables_for_version(version)?;

        let view = ConfigView::new(config);
        let files = source.files(source_path)?;
        info!(
            "rendering {} files for template {}",
            files.len(),
            config.template_name
        );

        for file in &files {
            let name = match file.file_name() {
                Some(name) => name.to_string_lossy().into_owned(),
                None => continue,
            };
            if name.eq_ignore_ascii_case(CONFIG_FILE_NAME) {
                debug!("skipping schema document {:?}", file);
                continue;
            }

            let content = source.read_to_string(file)?;
            let rendered = render_file(&content, file, &view)?;

            // Nested template files collapse to the destination root; only
            // the base name survives, after the override table.
            let out_name = config.output_file_name(&name);
            writer.write(&destination.join(out_name), rendered.as_bytes())?;
        }

        Ok(())
    }
}

/// Render one template body against the read-only view.
///
/// Every variable with a value is exposed under its name, so `{{ NAME }}`
/// interpolates and a reference to an unknown or unresolved variable is a
/// hard error. `var(name="NAME")` reads through the kind's validator and
/// transformer instead.
fn render_file(content: &str, file: &Path, view: &ConfigView) -> RenderResult<String> {
    let name = file.to_string_lossy().into_owned();

    let mut context = Context::new();
    for (key, value) in view.raw_values() {
        context.insert(key, &value);
    }

    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);

    let lookup = Arc::new(view.clone());
    tera.register_function(
        "var",
        move |args: &HashMap<String, Value>| -> tera::Result<Value> {
            let requested = args
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| tera::Error::msg("var() requires a name argument"))?;
            let value = lookup
                .value(requested)
                .map_err(|e| tera::Error::msg(e.to_string()))?;
            Ok(Value::String(value))
        },
    );

    tera.add_raw_template(&name, content)
        .map_err(|source| RenderError::Template {
            file: name.clone(),
            source,
        })?;
    tera.render(&name, &context)
        .map_err(|source| RenderError::Template {
            file: name.clone(),
            source,
        })
}
