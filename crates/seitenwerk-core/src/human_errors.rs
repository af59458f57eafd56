// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages.
//
// Every failure is collapsed into one plain-language message per operation,
// plus a suggestion. Technical detail is only kept where it helps diagnose
// renderer asset problems.

use std::fmt;

use crate::error::SeitenwerkError;

/// The user-initiated operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Inspect,
    Merge,
    Split,
    Extract,
    Compress,
}

impl Operation {
    fn verb(&self) -> &'static str {
        match self {
            Self::Inspect => "Reading the file",
            Self::Merge => "Merging",
            Self::Split => "Splitting",
            Self::Extract => "Extracting pages",
            Self::Compress => "Compressing",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Inspect => "inspect",
            Self::Merge => "merge",
            Self::Split => "split",
            Self::Extract => "extract",
            Self::Compress => "compress",
        };
        f.write_str(name)
    }
}

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Something else is running, or the disk hiccuped; trying again may work.
    Transient,
    /// The user has to change their input (ranges, file choice).
    ActionRequired,
    /// The file itself cannot be processed.
    Permanent,
}

/// A human-readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    pub message: String,
    pub suggestion: String,
    pub retriable: bool,
    pub severity: Severity,
}

impl fmt::Display for HumanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.message, self.suggestion)
    }
}

/// Convert a `SeitenwerkError` raised during `operation` into a `HumanError`.
pub fn humanize_error(operation: Operation, err: &SeitenwerkError) -> HumanError {
    let verb = operation.verb();
    match err {
        SeitenwerkError::Parse(_) | SeitenwerkError::PdfError(_) => HumanError {
            message: format!("{verb} failed."),
            suggestion: "The file may be corrupted or encrypted. Try opening it in a PDF viewer first, or choose a different file.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        SeitenwerkError::Validation(detail) => HumanError {
            message: detail.clone(),
            suggestion: "Check the page numbers and try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        SeitenwerkError::NotPdf(name) => HumanError {
            message: format!("'{name}' is not a PDF file."),
            suggestion: "Only PDF files can be merged, split, or compressed.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        SeitenwerkError::Renderer(detail) => humanize_renderer_error(verb, detail),

        SeitenwerkError::Serialize(_) => HumanError {
            message: format!("{verb} failed while writing the result."),
            suggestion: "The file may use features that can't be rewritten. Try a different compression level or file.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        SeitenwerkError::Busy => HumanError {
            message: "Another operation is still running.".into(),
            suggestion: "Wait for it to finish, then try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        SeitenwerkError::Archive(_) => HumanError {
            message: "The results couldn't be bundled into a zip file.".into(),
            suggestion: "Try saving the files individually instead.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        SeitenwerkError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "The file couldn't be found.".into(),
                suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "Permission denied while reading or writing a file.".into(),
                suggestion: "Check the file permissions, or pick a different output location.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            _ => HumanError {
                message: "There was a problem reading or writing a file.".into(),
                suggestion: "Try again. If this keeps happening, the disk may be full.".into(),
                retriable: true,
                severity: Severity::Transient,
            },
        },

        SeitenwerkError::Config(_) => HumanError {
            message: "The settings file couldn't be read.".into(),
            suggestion: "Fix or delete the config file; defaults will be used otherwise.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },
    }
}

/// Renderer failures keep their detail: they are almost always a missing or
/// blocked asset, and the path in the message is what the user needs.
fn humanize_renderer_error(verb: &str, detail: &str) -> HumanError {
    let lower = detail.to_ascii_lowercase();
    if lower.contains("library") || lower.contains("asset") || lower.contains("not found") {
        HumanError {
            message: format!("{verb} failed: the page renderer could not be started."),
            suggestion: format!(
                "Check that the renderer assets (cmaps, iccs, standard_fonts, runtime) are installed. ({detail})"
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        }
    } else {
        HumanError {
            message: format!("{verb} failed while rendering a page."),
            suggestion: format!("Try the low compression level, which does not render pages. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        }
    }
}
