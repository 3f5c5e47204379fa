//! Kernel utilities shared across modules.
//! Keep this crate lightweight; it carries the module registry, server state, and config loading.
//!
//! ## Config loading
//! ```rust,ignore
//! use gantry_kernel::config::load_config;
//! let cfg: serde_json::Value = load_config::<serde_json::Value>(Some("server")).unwrap();
//! ```

pub mod config;
pub mod prelude;
pub mod server;

pub use gantry_domain as domain;
