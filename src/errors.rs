//! Error Types
//!
//! This module defines the error type used throughout the widget tree and the
//! [`Diagnostics`] sink that collects non-fatal reports.
//!
//! # Overview
//!
//! Failures in the component tree never cross the parent/child boundary.
//! Configuration mistakes and failed async sequences are *reported* instead
//! of propagated:
//!
//! - configuration errors (missing construction fields) are warnings
//! - attachment-point errors (no parent scene location) are warnings
//! - rejected load/unload/decorator tasks are errors
//!
//! Every report is logged through the `log` facade and kept in an in-memory
//! buffer that tests and observers can drain.
//!
//! ```rust,ignore
//! use stagecraft::errors::{Diagnostics, WidgetError};
//!
//! let diagnostics = Diagnostics::new();
//! diagnostics.report("widget-base", WidgetError::MissingOptions { component: "widget-base".into() });
//! assert_eq!(diagnostics.take_reports().len(), 1);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

/// The main error type for the widget tree.
#[derive(Error, Debug)]
pub enum WidgetError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// The component was built without an options record.
    #[error("options property is missing for {component}")]
    MissingOptions { component: String },

    /// The component was built without a decorator list.
    #[error("decorators property is missing for {component}")]
    MissingDecorators { component: String },

    /// The options record could not be parsed.
    #[error("invalid options: {0}")]
    InvalidOptions(#[from] serde_json::Error),

    // ========================================================================
    // Attachment Errors
    // ========================================================================
    /// The parent exposes neither a group node nor a scene root.
    #[error("parent of {component} has no group or scene to attach to")]
    MissingAttachPoint { component: String },

    // ========================================================================
    // Async Sequence Errors
    // ========================================================================
    /// A decorator attach/detach/check task was rejected.
    #[error("decorator {decorator} failed: {reason}")]
    DecoratorFailed { decorator: String, reason: String },

    /// No decorator instance is registered under the given name.
    #[error("no decorator named {0}")]
    DecoratorNotFound(String),

    /// The evaluation was canceled through `cancel_load`.
    #[error("evaluation of {0} was canceled")]
    Canceled(String),

    /// The component was destroyed while a task referenced it.
    #[error("component {0} is destroyed")]
    Destroyed(String),
}

impl WidgetError {
    /// Builds a [`WidgetError::DecoratorFailed`] from any displayable reason.
    pub fn decorator(decorator: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::DecoratorFailed {
            decorator: decorator.into(),
            reason: reason.to_string(),
        }
    }

    /// How loudly this error is reported.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::MissingOptions { .. }
            | Self::MissingDecorators { .. }
            | Self::InvalidOptions(_)
            | Self::MissingAttachPoint { .. } => Severity::Warning,
            Self::Canceled(_) => Severity::Info,
            Self::DecoratorFailed { .. } | Self::DecoratorNotFound(_) | Self::Destroyed(_) => {
                Severity::Error
            }
        }
    }
}

/// Alias for `Result<T, WidgetError>`.
pub type Result<T> = std::result::Result<T, WidgetError>;

// ============================================================================
// Diagnostics
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    fn level(self) -> log::Level {
        match self {
            Severity::Info => log::Level::Debug,
            Severity::Warning => log::Level::Warn,
            Severity::Error => log::Level::Error,
        }
    }
}

/// A single non-fatal report.
#[derive(Debug)]
pub struct Report {
    /// Name of the component (or host) where the failure was caught.
    pub origin: String,
    pub error: WidgetError,
}

impl Report {
    #[inline]
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.error.severity()
    }
}

type Observer = Box<dyn Fn(&Report)>;

#[derive(Default)]
struct DiagnosticsInner {
    reports: RefCell<Vec<Report>>,
    observer: RefCell<Option<Observer>>,
}

/// Shared report sink handed from the host down to every component.
///
/// Cloning is cheap; all clones feed the same buffer.
#[derive(Clone, Default)]
pub struct Diagnostics {
    inner: Rc<DiagnosticsInner>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs an observer that sees every report as it happens.
    pub fn set_observer(&self, observer: impl Fn(&Report) + 'static) {
        *self.inner.observer.borrow_mut() = Some(Box::new(observer));
    }

    /// Logs the error and records it. Never fails, never panics.
    pub fn report(&self, origin: &str, error: WidgetError) {
        let severity = error.severity();
        log::log!(severity.level(), "[{origin}] {error}");

        let report = Report {
            origin: origin.to_owned(),
            error,
        };
        if let Some(observer) = self.inner.observer.borrow().as_ref() {
            observer(&report);
        }
        self.inner.reports.borrow_mut().push(report);
    }

    /// Drains every buffered report.
    pub fn take_reports(&self) -> Vec<Report> {
        std::mem::take(&mut *self.inner.reports.borrow_mut())
    }

    /// Number of buffered reports at or above `severity`.
    #[must_use]
    pub fn count_at_least(&self, severity: Severity) -> usize {
        self.inner
            .reports
            .borrow()
            .iter()
            .filter(|r| r.severity() >= severity)
            .count()
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("reports", &self.inner.reports.borrow().len())
            .finish_non_exhaustive()
    }
}
