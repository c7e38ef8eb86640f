//! Trade input model.
//!
//! - [`TradeRecord`]: the loosely-typed record delivered by the journal
//!   application (camelCase JSON, `f64` prices, optional fields).
//! - [`Trade`]: the validated record the engine computes over.

mod record;
mod types;

pub use record::{RejectedRecord, TradeRecord, partition_records};
pub use types::{InstrumentClass, Side, Trade};
