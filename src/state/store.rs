//! Immutable snapshot plus the store that swaps it and re-renders.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::{ApiVariant, Config};
use crate::fetch::RoverData;
use crate::view::{self, View};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub name: String,
}

/// One complete, consistent application state
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Deployment flavor; fixed for the session
    pub variant: ApiVariant,
    pub user: User,
    /// Rover tabs, in display order
    pub rovers: Vec<String>,
    pub selected_rover: String,
    /// Fetched payloads. Entries are added or replaced, never removed.
    pub rover_data: BTreeMap<String, RoverData>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Snapshot {
    pub fn new(
        variant: ApiVariant,
        user_name: impl Into<String>,
        rovers: Vec<String>,
        selected_rover: impl Into<String>,
    ) -> Self {
        Self {
            variant,
            user: User { name: user_name.into() },
            rovers,
            selected_rover: selected_rover.into(),
            rover_data: BTreeMap::new(),
            loading: false,
            error: None,
        }
    }

    /// Initial snapshot for a configured dashboard
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.variant,
            config.client.user_name.clone(),
            config.rovers(),
            config.initial_rover(),
        )
    }

    /// Cached payload for the selected rover
    pub fn selected_data(&self) -> Option<&RoverData> {
        self.rover_data.get(&self.selected_rover)
    }

    /// Shallow merge: every field set in `patch` replaces the current value,
    /// everything else is carried over. Returns a new snapshot.
    pub fn merge(&self, patch: Patch) -> Snapshot {
        let mut next = self.clone();

        if let Some(rover) = patch.selected_rover {
            next.selected_rover = rover;
        }
        if let Some((rover, data)) = patch.rover_data {
            next.rover_data.insert(rover, data);
        }
        if let Some(loading) = patch.loading {
            next.loading = loading;
        }
        if let Some(error) = patch.error {
            next.error = error;
        }

        next
    }
}

/// A partial update. Unset fields leave the snapshot untouched.
///
/// `rover_data` can only add or replace one entry, so no update can shrink the map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    selected_rover: Option<String>,
    rover_data: Option<(String, RoverData)>,
    loading: Option<bool>,
    error: Option<Option<String>>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_rover(mut self, rover: impl Into<String>) -> Self {
        self.selected_rover = Some(rover.into());
        self
    }

    pub fn rover_data(mut self, rover: impl Into<String>, data: RoverData) -> Self {
        self.rover_data = Some((rover.into(), data));
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = Some(loading);
        self
    }

    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(Some(message.into()));
        self
    }

    pub fn clear_error(mut self) -> Self {
        self.error = Some(None);
        self
    }
}

/// Single source of truth for the dashboard.
///
/// Every [`Store::update`] swaps in a new snapshot and re-renders the whole view
/// before returning, so readers only ever see a complete snapshot and a view
/// rendered from it.
pub struct Store {
    snapshot: Arc<Snapshot>,
    view: View,
    renders: u64,
}

impl Store {
    pub fn new(initial: Snapshot) -> Self {
        let view = view::render(&initial);
        Self {
            snapshot: Arc::new(initial),
            view,
            renders: 1,
        }
    }

    /// Merge `patch` and re-render
    pub fn update(&mut self, patch: Patch) {
        self.snapshot = Arc::new(self.snapshot.merge(patch));
        self.view = view::render(&self.snapshot);
        self.renders += 1;
    }

    /// Current snapshot. Holding on to it is cheap and it never changes underneath.
    pub fn state(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    /// View rendered from the current snapshot
    pub fn view(&self) -> &View {
        &self.view
    }

    /// How many times the view has been rendered
    pub fn renders(&self) -> u64 {
        self.renders
    }
}
