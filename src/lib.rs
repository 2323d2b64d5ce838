//! CorDapp client generator
//!
//! Turns the OpenAPI description of a Corda node into a Kotlin client SDK:
//! the document is filtered down to the CorDapp resources, schema names are
//! reconciled against the model classes that already exist, and a
//! template-driven engine emits model classes, JAX-RS client interfaces and
//! optional tests.
#![deny(unsafe_code)]

pub mod application;
pub mod config;
pub mod generation;
pub mod infrastructure;
