//! Domain types for coinwatch.
//!
//! - [`Symbol`]: opaque coin symbol, matched exactly (case-sensitive).
//! - [`Timestamp`]: timezone-naive timestamp, second precision, serialized
//!   as `yyyy-MM-dd HH:mm:ss`.
//! - [`Ticker`]: a priced-asset snapshot; duplicates are possible and the
//!   store does not deduplicate them.

mod symbol;
mod ticker;
mod timestamp;

pub use symbol::Symbol;
pub use ticker::Ticker;
pub use timestamp::Timestamp;
