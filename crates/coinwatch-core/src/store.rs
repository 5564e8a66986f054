//! Adapter from the string-typed DuckDB store to domain values.

use coinwatch_store::{StoreError, TickerRecord, TickerRepository};

use crate::{Symbol, Ticker, TickerStore, Timestamp};

/// [`TickerStore`] backed by the DuckDB [`TickerRepository`].
pub struct DuckDbTickerStore {
    repository: TickerRepository,
}

impl DuckDbTickerStore {
    #[must_use]
    pub fn new(repository: TickerRepository) -> Self {
        Self { repository }
    }
}

impl TickerStore for DuckDbTickerStore {
    fn find_in_range(
        &self,
        symbol: &Symbol,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<Ticker>, StoreError> {
        let records =
            self.repository
                .find_in_range(symbol.as_str(), &start.format(), &end.format())?;

        records.into_iter().map(ticker_from_record).collect()
    }
}

/// A stored row that fails domain validation is a store-integrity problem,
/// not a caller error.
fn ticker_from_record(record: TickerRecord) -> Result<Ticker, StoreError> {
    let symbol = Symbol::parse(&record.symbol)
        .map_err(|error| StoreError::MalformedRecord(error.to_string()))?;
    let last_updated = Timestamp::parse(&record.last_updated)
        .map_err(|error| StoreError::MalformedRecord(error.to_string()))?;

    Ok(Ticker {
        symbol,
        name: record.name,
        price: record.price,
        market_cap: record.market_cap,
        last_updated,
    })
}
