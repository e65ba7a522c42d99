// =============================
// tests/unit/exemption_tests.rs
// =============================
//! Unit tests for the exemption path matcher
use authgate_lib::auth::{requires_auth, ExemptionList, ExemptionPattern};

fn check(path: Option<&str>, exemptions: &[&str]) -> bool {
    requires_auth(path, Some(exemptions))
}

#[test]
fn test_absent_inputs_require_auth() {
    let none: Option<&[&str]> = None;
    assert!(requires_auth(Some("/api/v1/status"), none));
    assert!(check(None, &["/api/v1/status/", "*"]));
    assert!(check(Some(""), &["*"]));
    assert!(check(Some("/api/v1/status"), &[]));
    assert!(check(Some("/"), &[]));
}

#[test]
fn test_exact_entries() {
    assert!(!check(Some("/api/v1/status"), &["/api/v1/status/"]));
    assert!(!check(Some("/api/v1/status/"), &["/api/v1/status/"]));
    assert!(!check(Some("/api/v1/status"), &["/api/v1/status"]));
    assert!(check(Some("/api/v1/status"), &["/api/v1/stat/"]));
    assert!(check(Some("/api/v1/status/extra"), &["/api/v1/status/"]));
}

#[test]
fn test_wildcard_entries() {
    assert!(!check(Some("/api/v1/users/anything"), &["/api/v1/users/*"]));
    assert!(!check(Some("/api/v1/users"), &["/api/v1/users/*"]));
    assert!(check(Some("/api/v1/admin"), &["/api/v1/users/*"]));
    // the prefix is normalized before matching
    assert!(check(Some("/api/v1/status"), &["/api/v1/stat*"]));
    assert!(!check(Some("/api/v1/stat/x"), &["/api/v1/stat*"]));
}

#[test]
fn test_catch_all_wildcards() {
    for pattern in ["*", "/*"] {
        assert!(!check(Some("/api/v1/anything/at/all"), &[pattern]));
        assert!(!check(Some("/"), &[pattern]));
    }
}

#[test]
fn test_trailing_separator_is_idempotent() {
    let exemptions = ["/api/v1/status/", "/api/v1/users/*"];
    for path in ["/api/v1/status", "/api/v1/users/42", "/api/v1/admin", "/"] {
        let with_slash = format!("{}/", path.trim_end_matches('/'));
        assert_eq!(
            check(Some(path), &exemptions),
            check(Some(with_slash.as_str()), &exemptions),
            "{path}"
        );
    }
}

#[test]
fn test_order_does_not_matter() {
    let forward = ["/api/v1/status/", "/api/v1/users/*", "/api/v1/users/me/"];
    let mut backward = forward;
    backward.reverse();
    for path in ["/api/v1/users/me", "/api/v1/status", "/api/v1/other", "/api/v1/users/"] {
        assert_eq!(check(Some(path), &forward), check(Some(path), &backward), "{path}");
    }
}

#[test]
fn test_parsed_list_matches_free_function() {
    let entries = ["/api/v1/status/", "", "/api/v1/public/*"];
    let list = ExemptionList::new(entries);
    assert_eq!(list.patterns().len(), 2);
    assert!(matches!(list.patterns()[1], ExemptionPattern::Prefix(_)));

    for path in ["/api/v1/status", "/api/v1/public/doc", "/api/v1/private"] {
        assert_eq!(list.requires_auth(Some(path)), check(Some(path), &entries), "{path}");
    }
    assert!(ExemptionList::new(Vec::<String>::new()).requires_auth(Some("/api/v1/status")));
}
