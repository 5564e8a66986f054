use std::sync::Arc;

use coinwatch_store::StoreError;

use crate::{ServiceError, Symbol, Ticker, Timestamp};

/// Maximum whole-day span a single query may cover.
pub const MAX_QUERY_DAYS: i64 = 31;

/// Seam between the query service and the backing store.
pub trait TickerStore: Send + Sync {
    /// All tickers for `symbol` with update times strictly between `start`
    /// and `end`, ascending by update time.
    fn find_in_range(
        &self,
        symbol: &Symbol,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<Ticker>, StoreError>;
}

/// Range-validating ticker query service.
///
/// Holds no per-request state; the only shared piece is the injected store
/// handle, so concurrent calls proceed independently.
pub struct TickerService {
    store: Arc<dyn TickerStore>,
}

impl TickerService {
    #[must_use]
    pub fn new(store: Arc<dyn TickerStore>) -> Self {
        Self { store }
    }

    /// Find tickers for `symbol` inside the window, rejecting windows that
    /// span more than [`MAX_QUERY_DAYS`] whole days.
    ///
    /// The span is computed symmetrically, so swapping `start` and `end`
    /// can never slip an over-long window past the guard. On a valid window
    /// the store result is returned unmodified.
    ///
    /// # Errors
    /// [`ServiceError::InvalidRange`] if the window is too long (the store
    /// is not touched); [`ServiceError::Store`] if the store query fails.
    pub fn find(
        &self,
        symbol: &Symbol,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<Ticker>, ServiceError> {
        let days = query_span_days(start, end);
        if days > MAX_QUERY_DAYS {
            return Err(ServiceError::InvalidRange {
                days,
                max: MAX_QUERY_DAYS,
            });
        }

        Ok(self.store.find_in_range(symbol, start, end)?)
    }
}

/// Whole-day span of the query window, independent of argument order.
fn query_span_days(start: Timestamp, end: Timestamp) -> i64 {
    (end.into_inner() - start.into_inner()).whole_days().abs()
}
