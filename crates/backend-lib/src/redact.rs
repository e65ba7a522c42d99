// ============================
// authgate-lib/src/redact.rs
// ============================
//! PII redaction for log output.
//!
//! Log lines carrying `field=value` pairs have the values of personal
//! fields replaced before they reach the sink.
use std::{borrow::Cow, io, sync::Arc};
use regex::{Captures, Regex};
use tracing_subscriber::fmt::MakeWriter;
use crate::storage::UserStore;
use crate::user::User;

/// Fields considered personal data
pub const PII_FIELDS: [&str; 5] = ["name", "email", "phone", "ssn", "password"];

/// Target used when logging user rows
pub const USER_DATA_TARGET: &str = "user_data";

/// Compiled redaction rule for a set of fields
#[derive(Debug, Clone)]
pub struct Redactor {
    /// `None` when no field is redacted
    pattern: Option<Regex>,
    redaction: String,
}

impl Redactor {
    pub fn new<S: AsRef<str>>(fields: &[S], redaction: &str, separator: &str) -> Result<Self, regex::Error> {
        if fields.is_empty() {
            return Ok(Self { pattern: None, redaction: redaction.to_string() });
        }
        let alternatives = fields
            .iter()
            .map(|f| regex::escape(f.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        let stop = separator
            .chars()
            .map(|c| regex::escape(&c.to_string()))
            .collect::<String>();
        // a value never runs past the end of its line
        let pattern = Regex::new(&format!("({alternatives})=[^{stop}\\r\\n]*"))?;
        Ok(Self { pattern: Some(pattern), redaction: redaction.to_string() })
    }

    /// `message` with every configured field's value replaced
    pub fn redact<'a>(&self, message: &'a str) -> Cow<'a, str> {
        match &self.pattern {
            Some(pattern) => pattern.replace_all(message, |caps: &Captures| format!("{}={}", &caps[1], self.redaction)),
            None => Cow::Borrowed(message),
        }
    }
}

/// Obfuscate the values of `fields` in a `separator`-delimited message
pub fn filter_datum<S: AsRef<str>>(fields: &[S], redaction: &str, message: &str, separator: &str) -> String {
    if separator.is_empty() {
        return message.to_string();
    }
    match Redactor::new(fields, redaction, separator) {
        Ok(redactor) => redactor.redact(message).into_owned(),
        Err(_) => message.to_string(),
    }
}

/// `tracing_subscriber` writer factory redacting every formatted line
#[derive(Debug, Clone)]
pub struct RedactingMakeWriter<M> {
    inner: M,
    redactor: Arc<Redactor>,
}

impl<M> RedactingMakeWriter<M> {
    pub fn new(inner: M, redactor: Redactor) -> Self {
        Self { inner, redactor: Arc::new(redactor) }
    }
}

impl<'a, M: MakeWriter<'a>> MakeWriter<'a> for RedactingMakeWriter<M> {
    type Writer = RedactingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter {
            inner: self.inner.make_writer(),
            redactor: Arc::clone(&self.redactor),
        }
    }
}

/// Writer produced by [`RedactingMakeWriter`]
pub struct RedactingWriter<W> {
    inner: W,
    redactor: Arc<Redactor>,
}

impl<W: io::Write> io::Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // the fmt layer hands over one whole event per write
        let text = String::from_utf8_lossy(buf);
        self.inner.write_all(self.redactor.redact(&text).as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// `key=value; ...` rendering of a stored user
pub fn format_user_row(user: &User) -> String {
    let optional = |v: &Option<String>| v.clone().unwrap_or_default();
    [
        ("id", user.id.to_string()),
        ("email", user.email.clone()),
        ("first_name", optional(&user.first_name)),
        ("last_name", optional(&user.last_name)),
        ("name", user.display_name()),
        ("hashed_password", user.hashed_password.clone()),
        ("created_at", user.created_at.to_rfc3339()),
        ("updated_at", user.updated_at.to_rfc3339()),
    ]
    .iter()
    .map(|(k, v)| format!("{k}={v}"))
    .collect::<Vec<_>>()
    .join("; ")
        + ";"
}

/// Log every stored user through the `user_data` target
pub fn log_user_rows<S: UserStore + ?Sized>(store: &S) -> usize {
    let users = store.all_users();
    for user in &users {
        tracing::info!(target: USER_DATA_TARGET, "{}", format_user_row(user));
    }
    users.len()
}
