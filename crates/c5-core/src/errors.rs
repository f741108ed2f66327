//! Error taxonomy for the theme compiler.
//!
//! Every variant is raised synchronously at the point of detection. Handle
//! errors are build-fatal; the others are caught at the per-document boundary
//! by the build orchestrator and reported as diagnostics.

use std::fmt;

use thiserror::Error;

/// Which handle failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleRole {
    Theme,
    Package,
}

impl fmt::Display for HandleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Theme => "Theme",
            Self::Package => "Package",
        };
        write!(f, "{s}")
    }
}

/// Errors raised while validating regions, fragment markers and theme handles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum C5Error {
    /// A `<c5-area>` tag without a non-empty `name` attribute.
    #[error("Invalid Area - Missing Name Tag")]
    InvalidRegion,

    /// An end-marker with no open fragment of the same label.
    #[error("Invalid Element - No Start Tag : {label}")]
    UnmatchedEndMarker { label: String },

    /// Content was requested from a fragment that was never closed.
    #[error("Invalid Element - No End Tag : {label}")]
    UnmatchedStartMarker { label: String },

    /// A begin-marker for a label that is still open.
    #[error("Invalid Element - Start Tag Already Open : {label}")]
    DuplicateStartMarker { label: String },

    /// A theme or package handle does not match the handle pattern.
    #[error("Invalid {role} Handle: {value}")]
    InvalidHandle { role: HandleRole, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn messages_identify_the_label() {
        let err = C5Error::UnmatchedEndMarker {
            label: "Header".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid Element - No Start Tag : Header");

        let err = C5Error::UnmatchedStartMarker {
            label: "Header".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid Element - No End Tag : Header");
    }

    #[test]
    fn handle_errors_name_their_role() {
        let err = C5Error::InvalidHandle {
            role: HandleRole::Package,
            value: "bad handle!".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid Package Handle: bad handle!");
    }
}
