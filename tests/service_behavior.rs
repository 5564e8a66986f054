//! Behavior-driven tests for the range-validating ticker service.
//!
//! These tests verify HOW the service guards the query window, focusing on
//! caller-visible outcomes: what comes back, and whether the store was
//! touched at all.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use coinwatch_core::{
    ServiceError, StoreError, Symbol, Ticker, TickerService, TickerStore, Timestamp,
};

struct CountingStore {
    tickers: Vec<Ticker>,
    calls: AtomicUsize,
}

impl CountingStore {
    fn new(tickers: Vec<Ticker>) -> Self {
        Self {
            tickers,
            calls: AtomicUsize::new(0),
        }
    }
}

impl TickerStore for CountingStore {
    fn find_in_range(
        &self,
        _symbol: &Symbol,
        _start: Timestamp,
        _end: Timestamp,
    ) -> Result<Vec<Ticker>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tickers.clone())
    }
}

struct FailingStore;

impl TickerStore for FailingStore {
    fn find_in_range(
        &self,
        _symbol: &Symbol,
        _start: Timestamp,
        _end: Timestamp,
    ) -> Result<Vec<Ticker>, StoreError> {
        Err(StoreError::MalformedRecord(String::from("broken row")))
    }
}

fn symbol(input: &str) -> Symbol {
    Symbol::parse(input).expect("symbol")
}

fn ts(input: &str) -> Timestamp {
    Timestamp::parse(input).expect("timestamp")
}

fn btc_ticker(last_updated: &str) -> Ticker {
    Ticker {
        symbol: symbol("BTC"),
        name: "Bitcoin".to_string(),
        price: 7500.5,
        market_cap: 128_000_000_000.0,
        last_updated: ts(last_updated),
    }
}

#[test]
fn when_the_window_is_valid_the_store_result_is_returned_unmodified() {
    // Given: A store holding two tickers
    let expected = vec![btc_ticker("2018-06-02 09:00:00"), btc_ticker("2018-06-05 12:00:00")];
    let store = Arc::new(CountingStore::new(expected.clone()));
    let service = TickerService::new(Arc::clone(&store) as Arc<dyn TickerStore>);

    // When: The user queries a 9-day window
    let results = service
        .find(&symbol("BTC"), ts("2018-06-01 00:00:00"), ts("2018-06-10 23:59:59"))
        .expect("find should succeed");

    // Then: The store result passes through untouched, from one store call
    assert_eq!(results, expected);
    assert_eq!(store.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn when_the_window_exceeds_31_days_the_store_is_never_queried() {
    // Given: A store that would happily answer
    let store = Arc::new(CountingStore::new(vec![btc_ticker("2018-06-05 12:00:00")]));
    let service = TickerService::new(Arc::clone(&store) as Arc<dyn TickerStore>);

    // When: The user queries a 61-day window
    let err = service
        .find(&symbol("BTC"), ts("2018-06-01 00:00:00"), ts("2018-08-01 23:59:59"))
        .expect_err("find must fail");

    // Then: The request dies at the guard with no store side effect
    assert!(matches!(
        err,
        ServiceError::InvalidRange { days: 61, max: 31 }
    ));
    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn when_the_bounds_are_swapped_the_guard_still_fires() {
    // Given: A counting store
    let store = Arc::new(CountingStore::new(Vec::new()));
    let service = TickerService::new(Arc::clone(&store) as Arc<dyn TickerStore>);

    // When: The user submits the 61-day window with start and end reversed
    let err = service
        .find(&symbol("BTC"), ts("2018-08-01 23:59:59"), ts("2018-06-01 00:00:00"))
        .expect_err("find must fail");

    // Then: The negative duration cannot sneak past the symmetric span
    assert!(matches!(err, ServiceError::InvalidRange { days: 61, .. }));
    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn a_31_day_window_with_a_partial_day_remainder_is_allowed() {
    // Given: Any store
    let store = Arc::new(CountingStore::new(Vec::new()));
    let service = TickerService::new(Arc::clone(&store) as Arc<dyn TickerStore>);

    // When: The window spans 31 days and 23:59:59 (whole-day count: 31)
    let result = service.find(
        &symbol("BTC"),
        ts("2018-06-01 00:00:00"),
        ts("2018-07-02 23:59:59"),
    );

    // Then: Truncation to whole days keeps it at the limit, not over it
    assert!(result.is_ok());
    assert_eq!(store.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn store_failures_propagate_to_the_caller() {
    let service = TickerService::new(Arc::new(FailingStore));

    let err = service
        .find(&symbol("BTC"), ts("2018-06-01 00:00:00"), ts("2018-06-10 23:59:59"))
        .expect_err("find must fail");

    assert!(matches!(err, ServiceError::Store(_)));
}
