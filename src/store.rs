use crate::models::disk::IoCounters;
use std::collections::BTreeMap;

/// Last two counter snapshots per endpoint.
///
/// Keyed by a `BTreeMap` so iteration order, and therefore the order of tied
/// rows after a stable sort, is the same on every frame.
#[derive(Debug, Clone, Default)]
pub struct SampleStore {
    previous: BTreeMap<String, IoCounters>,
    current:  BTreeMap<String, IoCounters>,
}

impl SampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift the endpoint's current snapshot to previous and install `counters`.
    /// Returns `is_final` so the caller can decide whether to stop.
    pub fn record(&mut self, endpoint: &str, counters: IoCounters, is_final: bool) -> bool {
        match self.current.insert(endpoint.to_string(), counters) {
            Some(old) => { self.previous.insert(endpoint.to_string(), old); }
            None      => { self.previous.remove(endpoint); }
        }
        is_final
    }

    pub fn current(&self, endpoint: &str) -> Option<&IoCounters> {
        self.current.get(endpoint)
    }

    pub fn previous(&self, endpoint: &str) -> Option<&IoCounters> {
        self.previous.get(endpoint)
    }

    /// Endpoints with a current sample, with current and previous snapshots.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IoCounters, Option<&IoCounters>)> {
        self.current
            .iter()
            .map(|(ep, curr)| (ep.as_str(), curr, self.previous.get(ep)))
    }

    pub fn len(&self) -> usize { self.current.len() }
    pub fn is_empty(&self) -> bool { self.current.is_empty() }
}
