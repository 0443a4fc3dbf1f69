//! Error type for the compaction engine.

/// Errors raised by the core.
///
/// The core performs no I/O, so the only failure is a broken internal
/// invariant surfacing while compiled tables are serialized.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvariantViolation(format!("serializing compiled table: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization_failure_is_an_invariant_violation() {
        let json_err = serde_json::from_str::<u8>("x").unwrap_err();
        let err = Error::from(json_err);
        assert!(matches!(err, Error::InvariantViolation(ref m) if m.contains("serializing")));
        assert!(err.to_string().starts_with("Invariant violation: serializing compiled table"));
    }
}
