//! # formwork_templates
//!
//! Template rendering for Formwork.
//!
//! A renderer takes a loaded [`formwork_config::TemplateConfig`], a source
//! file tree, a destination, and a target version. It applies variable
//! defaults for that version, then renders every file under the source path
//! and writes the results through a pluggable writer. The schema document
//! itself is never emitted, and any reference to an unknown or unresolved
//! variable fails the render instead of substituting a blank.
//!
//! ## Example
//!
//! ```rust,no_run
//! use formwork_config::TemplateConfig;
//! use formwork_templates::{DirSource, LocalWriter, Renderer};
//!
//! let mut config = TemplateConfig::from_path("templates/webapp/formwork.yaml")?;
//! config.set_variable("APPNAME", "storefront");
//!
//! let mut renderer = Renderer::new(config)
//!     .source(DirSource::new("templates"))
//!     .source_path("webapp")
//!     .destination("./out");
//!
//! renderer.generate(&mut LocalWriter::new())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod renderer;
pub mod source;
pub mod writer;

pub use error::{RenderError, RenderResult};
pub use renderer::Renderer;
pub use source::{DirSource, TemplateSource};
pub use writer::{LocalWriter, MemoryWriter, TemplateWriter};
