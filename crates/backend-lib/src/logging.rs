// ============================
// authgate-lib/src/logging.rs
// ============================
//! Tracing subscriber setup.
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use crate::config::Settings;
use crate::redact::{RedactingMakeWriter, Redactor};

/// Install the global subscriber: `RUST_LOG` wins over `log_level`, and every
/// line passes through the PII redactor before reaching stderr.
pub fn init(settings: &Settings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))?;
    let redactor = Redactor::new(settings.pii_fields.as_slice(), &settings.redaction, &settings.log_separator)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(RedactingMakeWriter::new(std::io::stderr, redactor)),
        )
        .try_init()?;
    Ok(())
}
