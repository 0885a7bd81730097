//! Dashboard state and the reducer that applies one event at a time.

use crate::event::Event;
use crate::input::{handle_key, Action};
use crate::models::disk::Inventory;
use crate::store::SampleStore;
use std::collections::BTreeSet;
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Used,
    Await,
    Util,
    Read,
    Write,
    Discard,
    Tps,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name    => "name",
            SortKey::Used    => "used",
            SortKey::Await   => "await",
            SortKey::Util    => "util",
            SortKey::Read    => "read",
            SortKey::Write   => "write",
            SortKey::Discard => "discard",
            SortKey::Tps     => "tps",
        }
    }

    /// True when larger values sort first. The split is per metric and fixed.
    pub fn descending(&self) -> bool {
        matches!(self, SortKey::Used | SortKey::Await | SortKey::Util | SortKey::Discard)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Quitting,
}

/// Operator steering: which pool, which ordering, running or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub pool:     usize,
    pub max_pool: usize,
    pub sort_key: SortKey,
    pub status:   Status,
}

impl ViewState {
    pub fn new(max_pool: usize) -> Self {
        Self { pool: 0, max_pool, sort_key: SortKey::Name, status: Status::Running }
    }

    fn pool_right(&mut self) {
        self.pool = (self.pool + 1).min(self.max_pool);
    }

    fn pool_left(&mut self) {
        self.pool = self.pool.saturating_sub(1);
    }
}

/// Everything the reducer owns. Threaded by value through [`Model::reduce`].
#[derive(Debug, Clone)]
pub struct Model {
    pub view:  ViewState,
    pub store: SampleStore,
    /// Animation frame counter, advanced only by pulses.
    pub pulse: usize,
    /// Inventory endpoints; samples for anything else are not stored.
    known: BTreeSet<String>,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            view:  ViewState::new(0),
            store: SampleStore::new(),
            pulse: 0,
            known: BTreeSet::new(),
        }
    }
}

impl Model {
    pub fn new(inventory: &Inventory) -> Self {
        Self {
            view:  ViewState::new(inventory.max_pool()),
            known: inventory.endpoints().map(str::to_owned).collect(),
            ..Self::default()
        }
    }

    pub fn is_quitting(&self) -> bool {
        self.view.status == Status::Quitting
    }

    /// Apply one event. Once quitting, every event is a no-op.
    pub fn reduce(mut self, event: Event) -> Self {
        if self.is_quitting() {
            return self;
        }
        match event {
            Event::Key(key) => self.apply_action(handle_key(key)),
            Event::Sample { endpoint, counters, is_final } => {
                if self.known.contains(&endpoint) {
                    self.store.record(&endpoint, counters, is_final);
                } else {
                    trace!(%endpoint, "sample for endpoint outside inventory");
                }
                if is_final {
                    info!(%endpoint, "feed sent final sample");
                    self.view.status = Status::Quitting;
                }
            }
            Event::FeedEnded => {
                info!("feed ended");
                self.view.status = Status::Quitting;
            }
            Event::Pulse => self.pulse = self.pulse.wrapping_add(1),
        }
        self
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::Quit      => self.view.status = Status::Quitting,
            Action::PoolLeft  => self.view.pool_left(),
            Action::PoolRight => self.view.pool_right(),
            Action::Sort(key) => {
                debug!(sort = key.label(), "sort key changed");
                self.view.sort_key = key;
            }
            Action::None => {}
        }
    }
}
