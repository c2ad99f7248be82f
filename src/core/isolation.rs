//! Failure isolation for extension call-outs.
//!
//! Every call into code the engine does not own (hook handlers, status tick
//! handlers, relic reactions) goes through [`isolate`]. A call that returns
//! an error or panics is logged and turned into an [`Outcome::Failed`]
//! value; it never unwinds into the turn that made the call.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use super::error::{EngineError, HandlerError};

/// Why an isolated call failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// What was called, e.g. `hook relic-pack on turnEnd`.
    pub origin: String,

    /// The error the call reported.
    pub reason: String,
}

impl Failure {
    /// Convert into an engine error.
    #[must_use]
    pub fn into_error(self) -> EngineError {
        EngineError::HookHandlerFailure {
            origin: self.origin,
            reason: self.reason,
        }
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.origin, self.reason)
    }
}

/// Result of an isolated call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The call returned normally.
    Completed(T),
    /// The call reported an error or panicked; it has already been logged.
    Failed(Failure),
}

impl<T> Outcome<T> {
    /// Check whether the call completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    /// The value of a completed call.
    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            Outcome::Failed(_) => None,
        }
    }

    /// The failure of a failed call.
    pub fn failure(self) -> Option<Failure> {
        match self {
            Outcome::Completed(_) => None,
            Outcome::Failed(failure) => Some(failure),
        }
    }
}

/// Run an extension call-out, converting its error or panic into an
/// [`Outcome`].
///
/// Whatever the call mutated before panicking stays mutated; callers finish
/// their own bookkeeping (decay, sweep) after a failed outcome.
pub fn isolate<T, F>(origin: &str, call: F) -> Outcome<T>
where
    F: FnOnce() -> Result<T, HandlerError>,
{
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(value)) => Outcome::Completed(value),
        Ok(Err(err)) => {
            tracing::warn!(origin, reason = %err, "extension call failed");
            Outcome::Failed(Failure {
                origin: origin.to_string(),
                reason: err.0,
            })
        }
        Err(payload) => {
            let reason = panic_reason(payload.as_ref());
            tracing::error!(origin, reason = %reason, "extension call panicked");
            Outcome::Failed(Failure {
                origin: origin.to_string(),
                reason,
            })
        }
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_string()
    }
}
