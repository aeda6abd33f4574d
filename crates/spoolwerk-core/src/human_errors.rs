// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-language error messages for operators.
//
// Every technical error is mapped to a short explanation with a clear
// suggestion of what to do next.

use crate::error::SpoolError;

/// Severity of an error from the operator's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The operator must do something first (disconnect, connect, register).
    ActionRequired,
    /// Cannot be fixed by trying again, the request itself is wrong.
    Permanent,
}

/// A human-readable error with message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain summary (shown as a heading).
    pub message: String,
    /// What the operator should try.
    pub suggestion: String,
    /// Spoolwerk never retries on its own; always `false`.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `SpoolError` into a `HumanError`.
pub fn humanize_error(err: &SpoolError) -> HumanError {
    match err {
        SpoolError::AlreadyConnected { holder } => HumanError {
            message: "The USB printer is already in use.".into(),
            suggestion: format!("Ask {holder} to disconnect first, then connect again."),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        SpoolError::NotConnected => HumanError {
            message: "The USB printer isn't connected.".into(),
            suggestion: "Connect a computer to the USB printer, then try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        SpoolError::WrongClient { holder, requested } => HumanError {
            message: format!("{requested} can't disconnect the USB printer."),
            suggestion: format!("Only {holder}, which holds the link, can disconnect it."),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        SpoolError::UnsupportedType(tag) => HumanError {
            message: "That kind of printer isn't supported.".into(),
            suggestion: format!("Use NETWORK or USB. (Got: {tag})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        SpoolError::PrinterNotFound(kind) => HumanError {
            message: format!("No {kind} printer has been added."),
            suggestion: "Add the printer first, then try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        SpoolError::Runtime(detail) => HumanError {
            message: "The print service isn't running.".into(),
            suggestion: format!("Start devices from inside the async runtime. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        SpoolError::Config(detail) => HumanError {
            message: "The settings file has a mistake.".into(),
            suggestion: format!("Fix the settings file and restart. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        SpoolError::Io(io_err) => HumanError {
            message: "A file couldn't be read or written.".into(),
            suggestion: format!("Check the path and its permissions. ({io_err})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        SpoolError::Serialization(detail) => HumanError {
            message: "The settings file couldn't be understood.".into(),
            suggestion: format!("Make sure it is valid JSON. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClientId, DeviceKind};

    #[test]
    fn wrong_client_names_both_parties() {
        let err = SpoolError::WrongClient {
            holder: ClientId::from("C1"),
            requested: ClientId::from("C2"),
        };
        let human = humanize_error(&err);
        assert!(human.message.contains("C2"));
        assert!(human.suggestion.contains("C1"));
        assert_eq!(human.severity, Severity::ActionRequired);
    }

    #[test]
    fn unsupported_type_is_permanent() {
        let human = humanize_error(&SpoolError::UnsupportedType("FAX".into()));
        assert_eq!(human.severity, Severity::Permanent);
        assert!(human.suggestion.contains("FAX"));
    }

    #[test]
    fn nothing_is_retriable() {
        let errors = [
            SpoolError::NotConnected,
            SpoolError::PrinterNotFound(DeviceKind::Usb),
            SpoolError::AlreadyConnected { holder: ClientId::from("A") },
        ];
        assert!(errors.iter().all(|e| !humanize_error(e).retriable));
    }
}
