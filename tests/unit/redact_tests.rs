// ==========================
// tests/unit/redact_tests.rs
// ==========================
//! Unit tests for PII redaction
use authgate_lib::redact::{filter_datum, format_user_row, log_user_rows, Redactor, PII_FIELDS};
use authgate_lib::storage::{MemoryUserStore, UserStore};
use authgate_lib::user::User;

#[test]
fn test_filter_datum() {
    let message = "name=egg;email=eggmin@eggsample.com;password=eggcellent;date_of_birth=12/12/1986;";
    assert_eq!(
        filter_datum(&["password", "date_of_birth"], "xxx", message, ";"),
        "name=egg;email=eggmin@eggsample.com;password=xxx;date_of_birth=xxx;"
    );
}

#[test]
fn test_regex_metacharacters_are_literal() {
    assert_eq!(filter_datum(&["a.b"], "x", "a.b=1.axb=2.", "."), "a.b=x.axb=2.");
    assert_eq!(filter_datum(&["ip"], "-", "ip=1|ip=2|", "|"), "ip=-|ip=-|");
}

#[test]
fn test_user_row_is_redacted() {
    let mut user = User::new("bob@dylan.com", "$scrypt$ln=4$salt$hash");
    user.first_name = Some("Bob".into());
    user.last_name = Some("Dylan".into());

    let row = format_user_row(&user);
    assert!(row.contains("first_name=Bob; "));
    assert!(row.contains("name=Bob Dylan; "));

    let redacted = Redactor::new(&PII_FIELDS, "***", ";").unwrap().redact(&row).into_owned();
    assert!(redacted.contains("email=***;"));
    assert!(redacted.contains("first_name=***;"));
    assert!(redacted.contains("hashed_password=***;"));
    assert!(!redacted.contains("Dylan"));
}

#[test]
fn test_log_user_rows_counts_users() {
    let store = MemoryUserStore::new();
    assert_eq!(log_user_rows(&store), 0);
    store.add_user("a@b.c", "h1").unwrap();
    store.add_user("d@e.f", "h2").unwrap();
    assert_eq!(log_user_rows(&store), 2);
}

#[test]
fn test_redaction_stops_at_line_end() {
    let redactor = Redactor::new(&PII_FIELDS, "***", ";").unwrap();
    assert_eq!(
        redactor.redact("INFO a: request uri=/x?name=bob\nINFO b: next line\n"),
        "INFO a: request uri=/x?name=***\nINFO b: next line\n"
    );
}
