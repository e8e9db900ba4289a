//! Protocol error types.

use std::fmt;

/// Errors raised at the message boundary.
///
/// The engine never sees malformed input: anything that fails here is
/// rejected before dispatch, and the caller decides whether to log or
/// surface it.
#[derive(Debug)]
pub enum ProtocolError {
    /// JSON could not be decoded (or encoded) against the message schema.
    Json(serde_json::Error),
    /// A node record carried a `type` outside the known kind set.
    UnknownNodeType(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Json(e) => write!(f, "message JSON error: {e}"),
            ProtocolError::UnknownNodeType(t) => write!(f, "unknown node type: {t}"),
        }
    }
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProtocolError::Json(e) => Some(e),
            ProtocolError::UnknownNodeType(_) => None,
        }
    }
}

impl From<serde_json::Error> for ProtocolError {
    fn from(e: serde_json::Error) -> Self {
        ProtocolError::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_offending_type() {
        let err = ProtocolError::UnknownNodeType("folder".to_string());
        assert!(err.to_string().contains("folder"));
    }
}
