//! Class inventories feeding the type mapping resolver
//!
//! The generator cannot introspect a classpath, so the classes that already
//! exist for the client are supplied explicitly or discovered by scanning
//! model sources.

pub mod composite;
pub mod source_tree;
pub mod static_inventory;

pub use composite::CompositeClassInventory;
pub use source_tree::SourceTreeInventory;
pub use static_inventory::StaticClassInventory;
