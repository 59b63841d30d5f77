// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Warning/error annotations surfaced next to diagram elements.
//!
//! The host renders these as dismissible markers on the canvas; the core only
//! ever talks to the [`Annotations`] trait. [`NoticeLog`] is the in-process
//! implementation used by the CLI and the test suite.

use std::fmt;
use std::sync::Mutex;

use crate::model::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// One marker: a severity, a message, and the offending element.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    pub at: ElementId,
}

/// The annotation collaborator.
///
/// `annotate` replaces any prior marker on the same element; `clear_all`
/// removes every marker of one severity. `log` carries free-form debug output
/// (the `debug log` builtin); hosts may ignore it.
pub trait Annotations: Send + Sync {
    fn annotate(&self, severity: Severity, message: &str, at: &ElementId);

    fn clear_all(&self, severity: Severity);

    fn log(&self, message: &str) {
        let _ = message;
    }
}

/// In-memory marker store mirroring the replace/clear contract.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: Mutex<Vec<Notice>>,
    lines: Mutex<Vec<String>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current markers, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notice log poisoned").clone()
    }

    pub fn notices_of(&self, severity: Severity) -> Vec<Notice> {
        self.notices()
            .into_iter()
            .filter(|notice| notice.severity == severity)
            .collect()
    }

    pub fn log_lines(&self) -> Vec<String> {
        self.lines.lock().expect("notice log poisoned").clone()
    }
}

impl Annotations for NoticeLog {
    fn annotate(&self, severity: Severity, message: &str, at: &ElementId) {
        let mut notices = self.notices.lock().expect("notice log poisoned");
        notices.retain(|notice| &notice.at != at);
        notices.push(Notice { severity, message: message.to_owned(), at: at.clone() });
    }

    fn clear_all(&self, severity: Severity) {
        let mut notices = self.notices.lock().expect("notice log poisoned");
        notices.retain(|notice| notice.severity != severity);
    }

    fn log(&self, message: &str) {
        self.lines.lock().expect("notice log poisoned").push(message.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::{Annotations, NoticeLog, Severity};
    use crate::model::ElementId;

    fn id(value: &str) -> ElementId {
        ElementId::new(value).expect("element id")
    }

    #[test]
    fn annotate_replaces_prior_marker_on_same_element() {
        let log = NoticeLog::new();
        log.annotate(Severity::Warning, "first", &id("a"));
        log.annotate(Severity::Error, "second", &id("a"));

        let notices = log.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Error);
        assert_eq!(notices[0].message, "second");
    }

    #[test]
    fn clear_all_removes_only_one_severity() {
        let log = NoticeLog::new();
        log.annotate(Severity::Warning, "w", &id("a"));
        log.annotate(Severity::Error, "e", &id("b"));

        log.clear_all(Severity::Warning);

        let notices = log.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Error);
    }

    #[test]
    fn log_lines_accumulate() {
        let log = NoticeLog::new();
        log.log("one");
        log.log("two");
        assert_eq!(log.log_lines(), vec!["one".to_owned(), "two".to_owned()]);
    }
}
