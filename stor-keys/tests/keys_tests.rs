use std::collections::HashSet;
use stor_keys::{DEFAULT_FLAG_SUFFIX, Namespace, Scope, default_flag_key, value_key};

// ── Scope ─────────────────────────────────────────────────────────

#[test]
fn scope_named() {
    let scope = Scope::named("User");
    assert_eq!(scope.name(), "User");
    assert_eq!(scope.to_string(), "User");
}

#[test]
fn scope_named_empty_falls_back_to_anon() {
    let scope = Scope::named("");
    assert_eq!(scope.name(), "__ANON__");
}

#[test]
fn scope_global_sentinel() {
    let scope = Scope::global();
    assert_eq!(scope.name(), "__GLOBAL_NAMESPACE__");
    assert_eq!(Scope::default(), scope);
}

struct UserSettings;

#[test]
fn scope_of_type_uses_last_path_segment() {
    let scope = Scope::of::<UserSettings>();
    assert_eq!(scope.name(), "UserSettings");
    assert_eq!(scope, Scope::named("UserSettings"));
}

#[test]
fn scope_from_str() {
    let scope: Scope = "Profile".into();
    assert_eq!(scope.name(), "Profile");
}

#[test]
fn scope_serde_transparent() {
    let scope = Scope::named("User");
    let json = serde_json::to_string(&scope).unwrap();
    assert_eq!(json, "\"User\"");
    let back: Scope = serde_json::from_str(&json).unwrap();
    assert_eq!(back, scope);
}

// ── Namespace ─────────────────────────────────────────────────────

#[test]
fn namespace_default() {
    assert_eq!(Namespace::default().prefix(), "stor");
}

#[test]
fn namespace_for_app_kebab_cases() {
    assert_eq!(Namespace::for_app("My App").prefix(), "stor_my-app");
}

#[test]
fn namespace_for_app_empty_falls_back() {
    assert_eq!(Namespace::for_app("").prefix(), "stor");
    assert_eq!(Namespace::for_app("  ").prefix(), "stor");
}

#[test]
fn namespace_new_empty_falls_back() {
    assert_eq!(Namespace::new("").prefix(), "stor");
    assert_eq!(Namespace::new("custom").prefix(), "custom");
}

// ── Key derivation ────────────────────────────────────────────────

#[test]
fn value_key_shape() {
    let key = value_key(&Namespace::default(), &Scope::named("User"), "name");
    assert_eq!(key, "stor::stor.scope.User.prop.name");
}

#[test]
fn value_key_is_deterministic() {
    let ns = Namespace::for_app("demo");
    let scope = Scope::named("User");
    assert_eq!(value_key(&ns, &scope, "name"), value_key(&ns, &scope, "name"));
}

#[test]
fn default_flag_key_extends_value_key() {
    let ns = Namespace::default();
    let scope = Scope::named("User");
    let value = value_key(&ns, &scope, "name");
    let flag = default_flag_key(&ns, &scope, "name");
    assert_eq!(flag, format!("{value}{DEFAULT_FLAG_SUFFIX}"));
    assert!(flag.ends_with("::defaultvalueisset"));
}

#[test]
fn distinct_inputs_never_collide() {
    let ns = Namespace::default();
    let scopes = ["User", "Profile", "__GLOBAL_NAMESPACE__"];
    let props = ["name", "email", "theme"];

    let mut seen = HashSet::new();
    for scope in scopes {
        for prop in props {
            let scope = Scope::named(scope);
            assert!(seen.insert(value_key(&ns, &scope, prop)));
            assert!(seen.insert(default_flag_key(&ns, &scope, prop)));
        }
    }
}

#[test]
fn namespaces_partition_keys() {
    let scope = Scope::named("User");
    let a = value_key(&Namespace::for_app("app-a"), &scope, "name");
    let b = value_key(&Namespace::for_app("app-b"), &scope, "name");
    assert_ne!(a, b);
}
