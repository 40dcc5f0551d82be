//! In-flight generation registry for single-flight deduplication.

use std::collections::HashMap;
use std::sync::Mutex;

use futures::future::{BoxFuture, Shared};
use serde_json::Value;

use crate::cache::ContentKey;
use crate::Error;

/// One pending generation, cloneable by every concurrent waiter.
pub(crate) type FlightFuture = Shared<BoxFuture<'static, Result<Value, Error>>>;

/// Registry of pending generations, keyed by the canonical [`ContentKey`].
///
/// The mutex makes "check for an existing flight" and "install a new one" a
/// single atomic step per key, which is the whole stampede-avoidance
/// argument: between a miss and the start of generation no second caller can
/// slip in and start its own. The lock is only ever held for map operations,
/// never across an await.
#[derive(Default)]
pub(crate) struct InFlightRegistry {
    flights: Mutex<HashMap<ContentKey, FlightFuture>>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Joins the existing flight for `key`, or installs the one produced by
    /// `make`. Returns the future to await and whether this caller is the
    /// installer.
    pub fn join_or_install(
        &self,
        key: &ContentKey,
        make: impl FnOnce() -> FlightFuture,
    ) -> (FlightFuture, bool) {
        let mut flights = self.flights.lock().unwrap();
        if let Some(existing) = flights.get(key) {
            return (existing.clone(), false);
        }
        let flight = make();
        flights.insert(key.clone(), flight.clone());
        (flight, true)
    }

    /// Removes the flight for `key` once generation completes, success or
    /// failure, so a later non-overlapping call starts fresh.
    pub fn clear(&self, key: &ContentKey) {
        self.flights.lock().unwrap().remove(key);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.flights.lock().unwrap().len()
    }
}
