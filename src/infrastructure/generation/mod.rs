//! Generation infrastructure implementations

pub mod kotlin_context;
pub mod kotlin_types;
pub mod post_processor;
pub mod template_renderer;

pub use kotlin_context::KotlinContextBuilder;
pub use kotlin_types::KotlinTypeMapper;
pub use post_processor::{CommandFormatter, NoopFormatter};
pub use template_renderer::TeraCodegenEngine;
