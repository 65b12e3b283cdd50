//! Input and event handling
//!
//! Turns page events (search click, Enter in the search box, refresh click)
//! into dashboard loads and answers each with the page updates to apply.

use std::time::Duration;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, error};

use crate::config::UiConfig;
use crate::dashboard::Dashboard;
use crate::presentation::{self, DomUpdate};

/// Key that submits the search box
const SUBMIT_KEY: &str = "Enter";

/// Something the user did on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// Search button clicked, with the search box contents
    Search { input: String },
    /// Key pressed in the search box
    KeyPress { key: String, input: String },
    /// Refresh button clicked
    Refresh,
}

impl UiEvent {
    /// City typed into the search box, if this event submits one
    #[must_use]
    pub fn submitted_city(&self) -> Option<&str> {
        let input = match self {
            UiEvent::Search { input } => input,
            UiEvent::KeyPress { key, input } if key == SUBMIT_KEY => input,
            UiEvent::KeyPress { .. } | UiEvent::Refresh => return None,
        };
        Some(input.trim()).filter(|city| !city.is_empty())
    }
}

/// Updates to apply later, such as dismissing the error banner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deferred {
    pub after_ms: u64,
    pub updates: Vec<DomUpdate>,
}

/// Page updates produced by one event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    /// Applied while the load is in flight
    pub loading: Vec<DomUpdate>,
    /// Applied once the load settles
    pub updates: Vec<DomUpdate>,
    pub deferred: Option<Deferred>,
}

impl Reaction {
    /// True when the event did nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loading.is_empty() && self.updates.is_empty() && self.deferred.is_none()
    }
}

/// One dashboard page and the state behind it
pub struct Session {
    dashboard: Dashboard,
    loading_message: String,
    error_banner: Duration,
    last_render: RwLock<Vec<DomUpdate>>,
}

impl Session {
    pub fn new(dashboard: Dashboard, ui: &UiConfig) -> Self {
        Self {
            dashboard,
            loading_message: ui.loading_message.clone(),
            error_banner: Duration::from_secs(ui.error_banner_seconds.into()),
            last_render: RwLock::new(Vec::new()),
        }
    }

    /// City that refresh reloads, from the same load as [`Session::last_render`]
    pub async fn current_city(&self) -> Option<String> {
        let _render = self.last_render.read().await;
        self.dashboard.current_city().await
    }

    /// Updates that show the loading overlay
    #[must_use]
    pub fn loading_updates(&self) -> Vec<DomUpdate> {
        presentation::show_loading(&self.loading_message)
    }

    /// Dashboard updates of the last successful load, empty before the first
    pub async fn last_render(&self) -> Vec<DomUpdate> {
        self.last_render.read().await.clone()
    }

    /// Handle one page event. Blank searches, other keys and refreshing
    /// before anything has loaded produce an empty reaction.
    pub async fn dispatch(&self, event: UiEvent) -> Reaction {
        let city = match &event {
            UiEvent::Refresh => self.current_city().await,
            _ => event.submitted_city().map(str::to_string),
        };

        match city {
            Some(city) => self.load_city(&city).await,
            None => {
                debug!("Ignoring {:?}", event);
                Reaction::default()
            }
        }
    }

    /// Load `city` and describe the outcome as page updates.
    ///
    /// On failure the dashboard keeps its previous content and only the
    /// error banner changes. The loading overlay is hidden either way.
    pub async fn load_city(&self, city: &str) -> Reaction {
        let loading = self.loading_updates();

        let (mut updates, deferred) = match self.dashboard.fetch(city).await {
            Ok(record) => {
                let rendered = presentation::render_dashboard(&record, Local::now().time());
                // overlapping loads: whichever finishes last wins, for the
                // render and the refresh city together
                let mut last_render = self.last_render.write().await;
                self.dashboard.remember(city).await;
                *last_render = rendered.clone();
                (rendered, None)
            }
            Err(e) => {
                error!("Showing error for '{}': {}", city, e);
                let deferred = Deferred {
                    after_ms: u64::try_from(self.error_banner.as_millis()).unwrap_or(u64::MAX),
                    updates: presentation::hide_error(),
                };
                (presentation::show_error(&e.to_string()), Some(deferred))
            }
        };
        updates.extend(presentation::hide_loading());

        Reaction {
            loading,
            updates,
            deferred,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AirQualityLookup;
    use crate::dashboard::fakes::{FakeGeocoder, dashboard, with_geocoder};
    use crate::presentation::elements::*;

    fn session() -> Session {
        Session::new(dashboard(AirQualityLookup::City), &UiConfig::default())
    }

    fn search(input: &str) -> UiEvent {
        UiEvent::Search {
            input: input.to_string(),
        }
    }

    #[test]
    fn test_submitted_city_trims() {
        assert_eq!(search("  Paris \t").submitted_city(), Some("Paris"));
        assert_eq!(search("   ").submitted_city(), None);

        let enter = UiEvent::KeyPress {
            key: "Enter".to_string(),
            input: " Mumbai".to_string(),
        };
        assert_eq!(enter.submitted_city(), Some("Mumbai"));

        let other = UiEvent::KeyPress {
            key: "a".to_string(),
            input: "Mumbai".to_string(),
        };
        assert_eq!(other.submitted_city(), None);
    }

    #[tokio::test]
    async fn test_search_renders_dashboard() {
        let session = session();

        let reaction = session.dispatch(search(" Paris ")).await;

        assert_eq!(
            reaction.loading,
            presentation::show_loading("Fetching live AQI & weather...")
        );
        assert!(reaction.updates.contains(&DomUpdate::text(LOCATION, "Paris, FR")));
        assert!(reaction.updates.iter().any(|u| u.target() == LAST_UPDATED));
        assert_eq!(reaction.updates.last(), presentation::hide_loading().last());
        assert!(reaction.deferred.is_none());
        assert!(!session.last_render().await.is_empty());
    }

    #[tokio::test]
    async fn test_blank_search_is_ignored() {
        let session = session();
        assert!(session.dispatch(search("  ")).await.is_empty());
        assert!(session.current_city().await.is_none());
    }

    #[tokio::test]
    async fn test_refresh_without_city_is_ignored() {
        let session = session();
        assert!(session.dispatch(UiEvent::Refresh).await.is_empty());
    }

    #[tokio::test]
    async fn test_failure_shows_banner_and_keeps_dashboard() {
        let session = session();
        session.dispatch(search("Paris")).await;
        let before = session.last_render().await;

        let reaction = session.dispatch(search("Atlantis")).await;

        assert_eq!(
            reaction.updates,
            vec![
                DomUpdate::text(ERROR_TEXT, "City not found"),
                DomUpdate::style(ERROR_MESSAGE, "display", "flex"),
                DomUpdate::style(LOADING_OVERLAY, "display", "none"),
            ]
        );
        assert_eq!(
            reaction.deferred,
            Some(Deferred {
                after_ms: 5000,
                updates: presentation::hide_error(),
            })
        );
        assert_eq!(session.last_render().await, before);
        assert_eq!(
            session.current_city().await.as_deref(),
            Some("Paris")
        );
    }

    #[tokio::test]
    async fn test_overlapping_loads_keep_render_and_city_together() {
        let session = Session::new(
            with_geocoder(FakeGeocoder::slow("Paris"), AirQualityLookup::City),
            &UiConfig::default(),
        );

        // Paris starts first but finishes last
        let _ = tokio::join!(
            session.dispatch(search("Paris")),
            session.dispatch(search("Mumbai"))
        );

        assert_eq!(session.current_city().await.as_deref(), Some("Paris"));
        assert!(
            session
                .last_render()
                .await
                .contains(&DomUpdate::text(LOCATION, "Paris, FR"))
        );
    }

    #[tokio::test]
    async fn test_refresh_reloads_last_city() {
        let session = session();
        session.dispatch(search("Mumbai")).await;
        let _ = session.dispatch(search("Atlantis")).await;

        let reaction = session.dispatch(UiEvent::Refresh).await;

        assert!(reaction.updates.contains(&DomUpdate::text(LOCATION, "Mumbai, IN")));
    }

    #[test]
    fn test_event_json_shape() {
        let event: UiEvent =
            serde_json::from_str(r#"{"type":"key_press","key":"Enter","input":"Delhi"}"#).unwrap();
        assert_eq!(event.submitted_city(), Some("Delhi"));

        let event: UiEvent = serde_json::from_str(r#"{"type":"refresh"}"#).unwrap();
        assert_eq!(event, UiEvent::Refresh);
    }
}
