//! Generation domain module - turns a node's OpenAPI description into a
//! CorDapp client SDK
//!
//! The domain owns the rules (which paths and schemas take part), the type
//! mapping reconciliation against existing model classes and the driver that
//! feeds the codegen engine. Loading, rendering, formatting and writing are
//! ports implemented in the infrastructure layer.

pub mod context;
pub mod errors;
pub mod orchestrator;
pub mod rules;
pub mod traits;
pub mod type_mapping;
pub mod types;
pub mod utils;

pub use context::*;
pub use errors::*;
pub use orchestrator::*;
pub use rules::{ModelSelection, PathFilter, grouping_name, grouping_names};
pub use traits::*;
pub use type_mapping::*;
pub use types::*;
