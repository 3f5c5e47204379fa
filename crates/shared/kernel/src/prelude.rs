//! Ergonomic re-exports for server-side crates.

pub use crate::config::load_config;
pub use crate::server::{
    ApiState, ApiStateBuilder, ApiStateError, Modular, ModuleError, ModuleRegistry, RegistryError,
};
pub use gantry_domain as domain;
