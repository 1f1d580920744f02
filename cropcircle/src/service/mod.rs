//! The driving loop.
//!
//! [`Recalculator`] performs one pass: purge, reconcile, publish.
//! [`RecalculationDaemon`] repeats passes on an interval until shutdown.

mod daemon;
mod error;
mod recalculator;

pub use daemon::{DaemonSummary, RecalculationDaemon, DEFAULT_RECALCULATE_INTERVAL};
pub use error::RecalculateError;
pub use recalculator::{PassReport, Recalculator};
