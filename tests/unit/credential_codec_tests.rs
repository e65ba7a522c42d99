// ====================================
// tests/unit/credential_codec_tests.rs
// ====================================
//! Unit tests for the Basic credential codec and authenticator
use std::collections::HashMap;
use authgate_lib::auth::{
    basic::{decode_base64_authorization_header, extract_base64_authorization_header, extract_user_credentials},
    credentials_from_header, Authenticator, BasicAuth, BasicAuthStep, Credentials, RequestHeaders, ScryptHasher,
    SecretHasher,
};
use authgate_lib::storage::{MemoryUserStore, UserStore};
use base64::{engine::general_purpose::STANDARD, Engine as _};

fn basic(raw: &str) -> String {
    format!("Basic {}", STANDARD.encode(raw))
}

fn headers(value: &str) -> HashMap<String, String> {
    HashMap::from([("Authorization".to_string(), value.to_string())])
}

#[test]
fn test_codec_round_trip() {
    let header = basic("alice:secret");
    let token = extract_base64_authorization_header(Some(header.as_str()));
    let decoded = decode_base64_authorization_header(token);
    let creds = extract_user_credentials(decoded.as_deref()).unwrap();
    assert_eq!(creds, Credentials::new("alice", "secret"));
}

#[test]
fn test_each_stage_fails_to_none() {
    assert_eq!(extract_base64_authorization_header(Some("Bearer xyz")), None);
    assert_eq!(decode_base64_authorization_header(Some("!!!invalid!!!")), None);
    assert_eq!(extract_user_credentials(Some("nocolonhere")), None);

    assert_eq!(credentials_from_header(None), None);
    assert_eq!(credentials_from_header(Some("Bearer xyz")), None);
    assert_eq!(credentials_from_header(Some("Basic !!!invalid!!!")), None);
    assert_eq!(credentials_from_header(Some(basic("nocolonhere").as_str())), None);
}

#[test]
fn test_secret_keeps_extra_colons() {
    let creds = credentials_from_header(Some(basic("bob@hbtn.io:a:b:c").as_str())).unwrap();
    assert_eq!(creds.identifier, "bob@hbtn.io");
    assert_eq!(creds.secret.as_str(), "a:b:c");
}

#[test]
fn test_unknown_identifier_matches_absent_header() {
    let store = MemoryUserStore::new();
    let hash = ScryptHasher::with_log_n(4).unwrap().hash("H0lbertonSchool98!").unwrap();
    store.add_user("bob@hbtn.io", &hash).unwrap();
    let auth = BasicAuth::new(store);

    let unknown = headers(&basic("nobody@hbtn.io:H0lbertonSchool98!"));
    let empty: HashMap<String, String> = HashMap::new();
    assert_eq!(auth.current_user(Some(&unknown as &dyn RequestHeaders)), None);
    assert_eq!(auth.current_user(Some(&empty as &dyn RequestHeaders)), None);
    assert_eq!(auth.current_user(None), None);

    let valid = headers(&basic("bob@hbtn.io:H0lbertonSchool98!"));
    let (step, user) = auth.resolve(Some(&valid as &dyn RequestHeaders));
    assert_eq!(step, BasicAuthStep::Authenticated);
    assert_eq!(user.map(|u| u.email).as_deref(), Some("bob@hbtn.io"));
}
