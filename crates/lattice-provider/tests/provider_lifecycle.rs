#![allow(missing_docs, unused_results)]

use std::sync::Arc;

use assert_matches::assert_matches;
use lattice_provider::{
    AppProvider, AppProviderProps, LIBRARY_NAME, LIBRARY_VERSION, ProviderError, Scope,
    use_app_context,
};

fn props_with_i18n(value: serde_json::Value) -> AppProviderProps {
    AppProviderProps {
        i18n: Some(Arc::new(value.into())),
        ..AppProviderProps::default()
    }
}

#[test]
fn mount_consume_update_consume() {
    let mut provider = AppProvider::new_root(props_with_i18n(serde_json::json!({
        "Greeting": {"hello": "Hello, {name}!"}
    })));
    provider.mount();

    let view = use_app_context(provider.scope()).unwrap();
    let sticky_before = Arc::clone(&view.sticky_manager);
    let mut replacements = lattice_intl::Replacements::new();
    replacements.insert("name".to_string(), "Amy".into());
    assert_eq!(
        view.intl.translate("Greeting.hello", &replacements).unwrap(),
        "Hello, Amy!"
    );

    provider.update(props_with_i18n(serde_json::json!({
        "Greeting": {"hello": "Bonjour, {name}!"}
    })));

    let view = use_app_context(provider.scope()).unwrap();
    assert_eq!(
        view.intl.translate("Greeting.hello", &replacements).unwrap(),
        "Bonjour, Amy!"
    );
    // The sticky manager survives the localization-driven rebuild.
    assert!(Arc::ptr_eq(&view.sticky_manager, &sticky_before));
    // The container bound at mount is still in place.
    assert_eq!(view.sticky_manager.container().unwrap().name(), "document");
}

#[test]
fn nested_provider_wins_and_unmount_falls_back() {
    let outer = AppProvider::new_root(AppProviderProps::default());
    let inner = AppProvider::new(AppProviderProps::default(), outer.scope());

    let leaf = inner.scope().child();
    let view = use_app_context(&leaf).unwrap();
    assert!(Arc::ptr_eq(&view.sticky_manager, inner.sticky_manager()));

    drop(inner);
    let view = use_app_context(&leaf).unwrap();
    assert!(Arc::ptr_eq(&view.sticky_manager, outer.sticky_manager()));
}

#[test]
fn consumer_outside_any_provider_fails_loudly() {
    let scope = Scope::root().child().child();
    assert_matches!(use_app_context(&scope), Err(ProviderError::MissingProvider));
}

#[test]
fn legacy_integration_flows_through_the_provider() {
    let provider = AppProvider::new_root(AppProviderProps {
        api_key: Some("key".to_string()),
        host_origin: Some("shop.example.com".to_string()),
        ..AppProviderProps::default()
    });

    let view = use_app_context(provider.scope()).unwrap();
    let host_app = view.host_app.expect("api key constructs the host handle");

    let action = host_app.dispatch_raw("APP::NAVIGATION::REDIRECT", serde_json::json!({"to": "/"}));
    let identity = action.client_interface.unwrap();
    assert_eq!(identity.name, LIBRARY_NAME);
    assert_eq!(identity.version, LIBRARY_VERSION);
}

#[test]
fn scroll_lock_coordinates_across_consumers() {
    let provider = AppProvider::new_root(AppProviderProps::default());

    let modal = use_app_context(provider.scope()).unwrap();
    let sheet = use_app_context(provider.scope()).unwrap();
    let modal_lock = modal.scroll_lock_manager.unwrap();
    let sheet_lock = sheet.scroll_lock_manager.unwrap();

    // Both consumers share the provider's coordinator.
    assert!(Arc::ptr_eq(&modal_lock, &sheet_lock));

    let guard_a = modal_lock.lock();
    let guard_b = sheet_lock.lock();
    assert_eq!(provider.scroll_lock_manager().lock_count(), 2);

    drop(guard_a);
    assert!(provider.scroll_lock_manager().is_locked());
    drop(guard_b);
    assert!(!provider.scroll_lock_manager().is_locked());
}
