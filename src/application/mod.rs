//! Application layer - orchestrates use cases and coordinates between domains

pub mod dto;
pub mod errors;
pub mod generate_client;
pub mod services;
pub mod type_mappings;

pub use dto::*;
pub use errors::*;
pub use generate_client::GenerateClientUseCase;
pub use type_mappings::ResolveTypeMappingsUseCase;
