//! Temporal trip index: trips bucketed by start and end minute of day.
//!
//! The index owns the trip arena; each of the two bucket arrays holds one
//! slot per minute with [`TripId`] handles in insertion order. A window
//! query touches only the slots it covers, never the whole trip set.

use crate::time::{MINUTES_PER_DAY, MinuteOfDay, TimeFilter};
use crate::trips::{IngestError, Trip, TripId, TripRecord};

/// Which side of a trip a bucket array is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketSet {
    /// Keyed by start minute.
    Departures,
    /// Keyed by end minute.
    Arrivals,
}

type Buckets = Box<[Vec<TripId>; MINUTES_PER_DAY]>;

fn empty_buckets() -> Buckets {
    Box::new(std::array::from_fn(|_| Vec::new()))
}

/// Read-only once built. A reload means building a new index.
pub struct TripIndex {
    trips: Vec<Trip>,
    departures: Buckets,
    arrivals: Buckets,
}

impl TripIndex {
    pub fn builder() -> TripIndexBuilder {
        TripIndexBuilder {
            index: TripIndex {
                trips: Vec::new(),
                departures: empty_buckets(),
                arrivals: empty_buckets(),
            },
        }
    }

    /// Builds from already-ingested trips.
    pub fn from_trips(trips: impl IntoIterator<Item = Trip>) -> Self {
        let mut builder = Self::builder();
        for trip in trips {
            builder.insert(trip);
        }
        builder.finish()
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Trip handles in one minute slot.
    pub fn slot(&self, set: BucketSet, minute: MinuteOfDay) -> &[TripId] {
        &self.buckets(set)[minute.index()]
    }

    /// Trips whose relevant minute falls inside `filter`, in slot order then
    /// insertion order. `TimeFilter::Any` yields every trip.
    pub fn select(&self, set: BucketSet, filter: TimeFilter) -> impl Iterator<Item = &Trip> + '_ {
        let buckets = self.buckets(set);
        let (first, second) = filter.window_slots();
        buckets[first]
            .iter()
            .chain(buckets[second].iter())
            .flatten()
            .map(move |id| &self.trips[id.0])
    }

    fn buckets(&self, set: BucketSet) -> &[Vec<TripId>; MINUTES_PER_DAY] {
        match set {
            BucketSet::Departures => &self.departures,
            BucketSet::Arrivals => &self.arrivals,
        }
    }
}

/// Accumulates trips; hand it rows one at a time and call [`finish`](Self::finish).
pub struct TripIndexBuilder {
    index: TripIndex,
}

impl TripIndexBuilder {
    /// Ingests one raw row. A row that fails ingestion leaves the index untouched.
    pub fn push(&mut self, record: TripRecord) -> Result<TripId, IngestError> {
        let trip = Trip::try_from(record)?;
        Ok(self.insert(trip))
    }

    pub fn insert(&mut self, trip: Trip) -> TripId {
        let id = TripId(self.index.trips.len());
        self.index.departures[trip.start_minute.index()].push(id);
        self.index.arrivals[trip.end_minute.index()].push(id);
        self.index.trips.push(trip);
        id
    }

    pub fn finish(self) -> TripIndex {
        self.index
    }
}
