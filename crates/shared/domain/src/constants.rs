//! Stable identifiers shared between modules, routing, and configuration.

/// User directory module name.
pub const USERS: &str = "users";
/// Billing ledger module name.
pub const BILLING: &str = "billing";

/// Default API version prefix for module routers.
pub const DEFAULT_API_VERSION: &str = "v1";

// OpenAPI tags
pub const SYSTEM_TAG: &str = "System";
pub const USERS_TAG: &str = "Users";
pub const BILLING_TAG: &str = "Billing";
