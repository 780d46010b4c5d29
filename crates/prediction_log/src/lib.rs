//! CSV persistence for predictions.
//!
//! Two paths share this crate: the append-only log of single predictions
//! and the batch pipeline that scores a whole tabular file at once.

mod batch;
mod recorder;

pub use batch::{BatchError, BatchSummary, run_batch};
pub use recorder::{RecordError, append};
