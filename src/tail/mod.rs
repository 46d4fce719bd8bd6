//! Incremental tailing of the client log.

mod reader;
mod record;

pub use reader::{TailCursor, TailError, TailReader};
pub use record::DisplayRecord;
