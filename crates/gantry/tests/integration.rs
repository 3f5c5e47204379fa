use gantry::kernel::server::RegistryError;
use gantry::modules::users::Users;
use gantry_domain::config::ApiConfig;
use std::collections::BTreeSet;
use std::sync::Arc;

#[test]
fn init_registers_every_enabled_module() {
    let registry = gantry::init(&ApiConfig::default()).expect("registry builds");

    let modules = registry.load_modules();
    assert_eq!(modules.len(), 2);

    let names: BTreeSet<&str> = modules.iter().map(|m| m.name()).collect();
    assert_eq!(names, BTreeSet::from(["users", "billing"]));

    // Lookup hands back the registered instance; a never-registered name errors.
    let users = registry.load("users").expect("users registered");
    assert_eq!(users.name(), "users");
    assert!(matches!(
        registry.load("missing").expect_err("unknown module"),
        RegistryError::Unknown { .. }
    ));
}

#[test]
fn init_honors_the_module_selection() {
    let mut cfg = ApiConfig::default();
    cfg.modules.enabled = vec!["users".to_owned()];

    let registry = gantry::init(&cfg).expect("registry builds");
    assert_eq!(registry.len(), 1);
    assert!(registry.load("users").is_ok());
    assert!(registry.load("billing").is_err());
}

#[test]
fn init_with_no_known_modules_yields_an_empty_registry() {
    let mut cfg = ApiConfig::default();
    cfg.modules.enabled = vec!["nonexistent".to_owned()];

    let registry = gantry::init(&cfg).expect("registry builds");
    assert!(registry.is_empty());
}

#[test]
fn registries_from_separate_inits_are_independent() {
    let first = gantry::init(&ApiConfig::default()).expect("first registry");
    let second = gantry::init(&ApiConfig::default()).expect("second registry");

    // No process-global state: both registries carry their own instances.
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);

    let a = first.load("users").expect("users in first");
    let b = second.load("users").expect("users in second");
    assert!(!Arc::ptr_eq(&a, &b));
}

#[test]
fn re_registering_a_bootstrap_module_is_fatal() {
    let registry = gantry::init(&ApiConfig::default()).expect("registry builds");

    let err = registry.register(Arc::new(Users::new())).expect_err("duplicate rejected");
    assert!(matches!(&err, RegistryError::Duplicate { name } if name == "users"));
    assert!(err.is_fatal());
    assert_eq!(registry.len(), 2);
}

#[test]
fn enabled_module_listing_matches_registration() {
    assert!(gantry::modules::is_enabled("users"));
    assert!(gantry::modules::is_enabled("billing"));
    assert!(!gantry::modules::is_enabled("licensing"));
}
