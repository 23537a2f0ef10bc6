//! Rover selection and fetch coordination on top of the store

use anyhow::Result;
use thiserror::Error;

use crate::config::{ApiVariant, Config};
use crate::fetch::{self, FetchError, ProxyClient, RoverData};
use crate::state::{Patch, Snapshot, Store};
use crate::task::TaskSet;

/// What a poll observed. The UI turns these into status messages.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent {
    /// Data for `rover` was cached
    Loaded { rover: String },
    /// Fetching `rover` failed
    Failed { rover: String, message: String },
}

#[derive(Error, Debug, PartialEq)]
pub enum SelectionError {
    #[error("Unknown rover: {0}")]
    UnknownRover(String),
}

/// The dashboard's state owner.
///
/// Selections spawn fetch tasks; [`Dashboard::poll`] merges finished ones into the
/// store. Only the thread that owns the dashboard ever updates the store.
pub struct Dashboard {
    store: Store,
    client: ProxyClient,
    variant: ApiVariant,
    /// In-flight fetches keyed by rover. Never cancelled.
    tasks: TaskSet<String, Result<RoverData, FetchError>>,
}

impl Dashboard {
    pub fn new(config: &Config) -> Result<Self> {
        let client = ProxyClient::new(&config.client.proxy_url)?;
        Ok(Self::with_client(Snapshot::from_config(config), client))
    }

    pub fn with_client(initial: Snapshot, client: ProxyClient) -> Self {
        let variant = initial.variant;
        Self {
            store: Store::new(initial),
            client,
            variant,
            tasks: TaskSet::default(),
        }
    }

    /// Start loading the initially selected rover
    pub fn start(&mut self) {
        let rover = self.store.state().selected_rover.clone();
        self.store.update(Patch::new().loading(true));
        self.spawn_fetch(rover);
    }

    /// Select `rover` and fetch its data.
    ///
    /// The selection and loading flag are visible as soon as this returns, before
    /// any response. Every selection fetches, even for rovers already cached.
    pub fn select_rover(&mut self, rover: &str) -> Result<(), SelectionError> {
        let state = self.store.state();
        let Some(rover) = state.rovers.iter().find(|r| r.as_str() == rover) else {
            return Err(SelectionError::UnknownRover(rover.to_string()));
        };

        tracing::debug!("Selected {}", rover);
        self.store.update(Patch::new().selected_rover(rover.as_str()).loading(true));
        self.spawn_fetch(rover.clone());
        Ok(())
    }

    fn spawn_fetch(&mut self, rover: String) {
        let client = self.client.clone();
        let variant = self.variant;
        let name = rover.clone();

        let handle = tokio::spawn(async move { fetch::fetch_rover(&client, variant, &name).await });
        self.tasks.push(rover, handle);
    }

    /// Merge every finished fetch into the store, in the order they were started.
    ///
    /// A late response still lands under its own rover and still clears `loading`,
    /// even if another rover is selected by now.
    pub fn poll(&mut self) -> Vec<FetchEvent> {
        let mut events = Vec::new();

        for (rover, result) in self.tasks.drain_finished() {
            let outcome = match result {
                Ok(outcome) => outcome.map_err(|e| e.to_string()),
                Err(e) => Err(format!("task panicked: {}", e)),
            };

            match outcome {
                Ok(data) => {
                    tracing::info!("Loaded {} data", rover);
                    self.store
                        .update(Patch::new().rover_data(rover.as_str(), data).loading(false).clear_error());
                    events.push(FetchEvent::Loaded { rover });
                }
                Err(e) => {
                    tracing::error!("Failed to fetch {} data: {}", rover, e);
                    let message = fetch::failure_message(self.variant);
                    self.store.update(Patch::new().loading(false).error(message));
                    events.push(FetchEvent::Failed {
                        rover,
                        message: message.to_string(),
                    });
                }
            }
        }

        events
    }

    /// Whether any fetch is still running
    pub fn has_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{SLOW_DELAY, spawn_proxy};
    use crate::view::Content;
    use std::time::Duration;

    async fn dashboard(variant: ApiVariant, rovers: &[&str]) -> Dashboard {
        let (_upstream, proxy) = spawn_proxy(variant).await;
        let rovers = rovers.iter().map(|r| r.to_string()).collect();
        let initial = Snapshot::new(variant, "Explorer", rovers, "Curiosity");
        Dashboard::with_client(initial, ProxyClient::new(&proxy).unwrap())
    }

    /// Poll until no fetch is pending, collecting events
    async fn settle(dashboard: &mut Dashboard) -> Vec<FetchEvent> {
        let mut events = Vec::new();
        for _ in 0..200 {
            events.extend(dashboard.poll());
            if !dashboard.has_pending() {
                return events;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("fetches did not settle");
    }

    #[tokio::test]
    async fn test_start_loads_initial_rover() {
        let mut dashboard = dashboard(ApiVariant::Photos, &["Curiosity", "Spirit"]).await;
        dashboard.start();
        assert!(dashboard.store().state().loading);

        let events = settle(&mut dashboard).await;
        assert_eq!(events, vec![FetchEvent::Loaded { rover: "Curiosity".to_string() }]);

        let state = dashboard.store().state();
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert!(state.selected_data().is_some());
    }

    #[tokio::test]
    async fn test_selection_visible_before_response() {
        let mut dashboard = dashboard(ApiVariant::Photos, &["Curiosity", "Spirit"]).await;
        let renders = dashboard.store().renders();

        dashboard.select_rover("Spirit").unwrap();

        let state = dashboard.store().state();
        assert_eq!(state.selected_rover, "Spirit");
        assert!(state.loading);
        assert!(state.rover_data.is_empty());
        assert_eq!(dashboard.store().renders(), renders + 1);

        settle(&mut dashboard).await;
        assert!(dashboard.store().state().rover_data.contains_key("Spirit"));
    }

    #[tokio::test]
    async fn test_late_response_cached_under_its_rover() {
        let mut dashboard = dashboard(ApiVariant::Photos, &["Curiosity", "Slow"]).await;

        dashboard.select_rover("Slow").unwrap();
        dashboard.select_rover("Curiosity").unwrap();

        // Curiosity answers first; Slow is still in flight
        let first = settle_one(&mut dashboard, "Curiosity").await;
        assert!(first.contains(&FetchEvent::Loaded { rover: "Curiosity".to_string() }));
        assert!(dashboard.has_pending());
        // Any completion clears loading, even with another fetch in flight
        assert!(!dashboard.store().state().loading);

        tokio::time::sleep(SLOW_DELAY).await;
        let events = settle(&mut dashboard).await;
        assert_eq!(events, vec![FetchEvent::Loaded { rover: "Slow".to_string() }]);

        let state = dashboard.store().state();
        assert_eq!(state.selected_rover, "Curiosity");
        assert!(state.rover_data.contains_key("Slow"));
        assert!(state.rover_data.contains_key("Curiosity"));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_early_response_for_previous_selection() {
        let mut dashboard = dashboard(ApiVariant::Photos, &["Curiosity", "Slow"]).await;

        dashboard.select_rover("Curiosity").unwrap();
        dashboard.select_rover("Slow").unwrap();

        // Curiosity lands while Slow, the current selection, is still in flight
        settle_one(&mut dashboard, "Curiosity").await;
        assert!(dashboard.has_pending());
        let state = dashboard.store().state();
        assert_eq!(state.selected_rover, "Slow");
        assert!(!state.loading);
        assert_eq!(
            dashboard.store().view().content,
            Content::Placeholder("Select a rover to view data".to_string())
        );

        tokio::time::sleep(SLOW_DELAY).await;
        settle(&mut dashboard).await;
        assert!(dashboard.store().state().rover_data.contains_key("Slow"));
        assert!(matches!(dashboard.store().view().content, Content::Rover { .. }));
    }

    /// Poll until `rover` has loaded
    async fn settle_one(dashboard: &mut Dashboard, rover: &str) -> Vec<FetchEvent> {
        let mut events = Vec::new();
        for _ in 0..200 {
            events.extend(dashboard.poll());
            if dashboard.store().state().rover_data.contains_key(rover) {
                return events;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("{} did not load", rover);
    }

    #[tokio::test]
    async fn test_failure_sets_error_and_keeps_cache() {
        let mut dashboard = dashboard(ApiVariant::Photos, &["Curiosity", "Broken"]).await;
        dashboard.start();
        settle(&mut dashboard).await;

        dashboard.select_rover("Broken").unwrap();
        let events = settle(&mut dashboard).await;
        assert_eq!(
            events,
            vec![FetchEvent::Failed {
                rover: "Broken".to_string(),
                message: "Failed to load rover data. Please try again.".to_string(),
            }]
        );

        let state = dashboard.store().state();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Failed to load rover data. Please try again."));
        assert!(state.rover_data.contains_key("Curiosity"));
        assert!(!state.rover_data.contains_key("Broken"));

        // A later success clears the error
        dashboard.select_rover("Curiosity").unwrap();
        settle(&mut dashboard).await;
        assert_eq!(dashboard.store().state().error, None);
    }

    #[tokio::test]
    async fn test_image_search_failure_message() {
        let mut dashboard = dashboard(ApiVariant::ImageSearch, &["Curiosity", "Broken"]).await;
        dashboard.select_rover("Broken").unwrap();
        settle(&mut dashboard).await;

        assert_eq!(
            dashboard.store().state().error.as_deref(),
            Some("Failed to load rover images. Please try again.")
        );
    }

    #[tokio::test]
    async fn test_unknown_rover_rejected() {
        let mut dashboard = dashboard(ApiVariant::Photos, &["Curiosity"]).await;
        let renders = dashboard.store().renders();

        let err = dashboard.select_rover("Sojourner").unwrap_err();
        assert_eq!(err, SelectionError::UnknownRover("Sojourner".to_string()));
        assert_eq!(dashboard.store().renders(), renders);
        assert!(!dashboard.has_pending());
    }
}
