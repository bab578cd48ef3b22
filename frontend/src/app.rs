//! Screen controller.
//!
//! All UI events arrive as a [`Msg`]; [`App::update`] applies it to the
//! application state and returns the [`Effect`]s the browser shell must run
//! (fetches, geolocation, timers, dialogs). Nothing here touches the DOM, so
//! the whole flow runs under `cargo test` with a recording map adapter.

use shared::{AppConfig, RouteRequest, RouteResult, UserProfile};

use crate::error::ClientError;
use crate::forms::{apply_settings_input, InterestsForm, IntroForm, SettingsInput};
use crate::geolocation::{self, LocationOutcome, LocationStatus};
use crate::map::{MapAdapter, MapView, FIT_DELAY_MS};
use crate::panel::RoutePanel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Intro,
    Interests,
    Settings,
    Map,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Welcome,
        Screen::Intro,
        Screen::Interests,
        Screen::Settings,
        Screen::Map,
    ];

    pub fn element_id(self) -> &'static str {
        match self {
            Screen::Welcome => "screen-welcome",
            Screen::Intro => "screen-intro",
            Screen::Interests => "screen-interests",
            Screen::Settings => "screen-settings",
            Screen::Map => "screen-map",
        }
    }
}

/// Tags an async request so its answer can be dropped once superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(pub u32);

#[derive(Debug, Default)]
struct TicketCounter {
    current: u32,
}

impl TicketCounter {
    fn issue(&mut self) -> Ticket {
        self.current = self.current.wrapping_add(1);
        Ticket(self.current)
    }

    fn current(&self) -> Ticket {
        Ticket(self.current)
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.current == ticket.0
    }
}

#[derive(Debug)]
pub enum Msg {
    ConfigLoaded(Result<AppConfig, ClientError>),
    Start,
    NameChanged(String),
    AgeChanged(String),
    SubmitIntro,
    InterestsChanged(String),
    SubmitInterests,
    LocationResolved {
        session: Ticket,
        outcome: LocationOutcome,
    },
    SettingsChanged(SettingsInput),
    SubmitSettings,
    RouteFetched {
        ticket: Ticket,
        result: Result<RouteResult, ClientError>,
    },
    MapLaidOut,
    FitViewport(Ticket),
    CardClicked(usize),
    MarkerClicked(usize),
    TogglePanel,
    NewRouteRequested,
    NewRouteConfirmed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadConfig,
    RequestLocation(Ticket),
    /// Answer with [`Msg::MapLaidOut`] once the next render is on screen.
    RefreshMapLayout,
    GenerateRoute { ticket: Ticket, request: RouteRequest },
    ScheduleFit { ticket: Ticket, delay_ms: u32 },
    ScrollToCard(usize),
    Alert(String),
    ConfirmNewRoute,
}

#[derive(Debug, Clone, Copy)]
struct PendingRoute {
    ticket: Ticket,
    return_to_start: bool,
}

pub struct App<A> {
    config: Option<AppConfig>,
    profile: UserProfile,
    screen: Screen,
    intro: IntroForm,
    interests: InterestsForm,
    location: LocationStatus,
    loading: bool,
    sessions: TicketCounter,
    requests: TicketCounter,
    pending: Option<PendingRoute>,
    shown: Option<Ticket>,
    map: MapView<A>,
    panel: RoutePanel,
}

impl<A: MapAdapter> App<A> {
    pub fn new(adapter: A) -> Self {
        Self {
            config: None,
            profile: UserProfile::default(),
            screen: Screen::Welcome,
            intro: IntroForm::default(),
            interests: InterestsForm::default(),
            location: LocationStatus::Idle,
            loading: false,
            sessions: TicketCounter::default(),
            requests: TicketCounter::default(),
            pending: None,
            shown: None,
            map: MapView::new(adapter),
            panel: RoutePanel::default(),
        }
    }

    /// Effects to run once at startup.
    pub fn boot(&self) -> Vec<Effect> {
        vec![Effect::LoadConfig]
    }

    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        let mut effects = Vec::new();
        match msg {
            Msg::ConfigLoaded(Ok(config)) => {
                tracing::info!("configuration loaded");
                self.profile = UserProfile::with_defaults(&config.walk_settings);
                self.config = Some(config);
            }
            Msg::ConfigLoaded(Err(err)) => {
                tracing::error!("failed to load configuration: {err}");
            }
            Msg::Start => self.go_to(Screen::Intro),
            Msg::NameChanged(value) => self.intro.name = value,
            Msg::AgeChanged(value) => self.intro.age = value,
            Msg::SubmitIntro => {
                if self.intro.commit(&mut self.profile) {
                    self.go_to(Screen::Interests);
                }
            }
            Msg::InterestsChanged(value) => self.interests.set_text(value),
            Msg::SubmitInterests => {
                if self.interests.commit(&mut self.profile) {
                    self.go_to(Screen::Settings);
                    self.location = LocationStatus::Pending;
                    effects.push(Effect::RequestLocation(self.sessions.current()));
                }
            }
            Msg::LocationResolved { session, outcome } => {
                if !self.sessions.is_current(session) {
                    tracing::debug!(session = session.0, "dropping stale location");
                    return effects;
                }
                let fallback = self.config.as_ref().map(|c| c.map.center());
                let (location, status) = geolocation::resolve(&outcome, fallback);
                self.profile.set_location(location);
                self.location = status;
            }
            Msg::SettingsChanged(input) => {
                let settings = self.config.as_ref().map(|c| &c.walk_settings);
                apply_settings_input(&mut self.profile, settings, input);
            }
            Msg::SubmitSettings => self.submit_route(&mut effects),
            Msg::RouteFetched { ticket, result } => {
                let pending = match self.pending {
                    Some(pending) if pending.ticket == ticket => pending,
                    _ => {
                        tracing::debug!(ticket = ticket.0, "dropping stale route response");
                        return effects;
                    }
                };
                self.pending = None;
                self.loading = false;
                let shown = result.and_then(|route| {
                    self.map.show_route(&route, pending.return_to_start)?;
                    Ok(route)
                });
                match shown {
                    Ok(route) => {
                        tracing::info!(places = route.route.len(), "route displayed");
                        self.panel.show(route);
                        self.shown = Some(ticket);
                        effects.push(Effect::ScheduleFit {
                            ticket,
                            delay_ms: FIT_DELAY_MS,
                        });
                    }
                    Err(err) => self.fail_route(err, &mut effects),
                }
            }
            Msg::MapLaidOut => {
                if self.screen == Screen::Map {
                    self.map.refresh_layout();
                }
            }
            Msg::FitViewport(ticket) => {
                if self.shown == Some(ticket) {
                    self.map.fit_to_route();
                }
            }
            Msg::CardClicked(index) => {
                if let Some(place) = self.panel.select(index) {
                    let position = place.coordinate();
                    self.map.focus_place(index, position);
                }
            }
            Msg::MarkerClicked(index) => {
                if self.panel.select(index).is_some() {
                    effects.push(Effect::ScrollToCard(index));
                }
            }
            Msg::TogglePanel => self.panel.toggle_collapsed(),
            Msg::NewRouteRequested => effects.push(Effect::ConfirmNewRoute),
            Msg::NewRouteConfirmed => self.reset(),
        }
        effects
    }

    /// Activates `screen`. Entering the Map screen creates the map the
    /// first time around.
    pub fn go_to(&mut self, screen: Screen) {
        self.screen = screen;
        if screen == Screen::Map {
            let settings = self.config.as_ref().map(|c| &c.map);
            self.map.ensure_initialized(settings);
        }
    }

    fn submit_route(&mut self, effects: &mut Vec<Effect>) {
        if self.pending.is_some() {
            tracing::debug!("route request already in flight");
            return;
        }
        let request = match self.profile.to_request() {
            Ok(request) => request,
            Err(missing) => {
                self.fail_route(missing.into(), effects);
                return;
            }
        };

        self.go_to(Screen::Map);
        if !self.map.is_initialized() {
            self.fail_route(ClientError::MapUnavailable, effects);
            return;
        }

        let ticket = self.requests.issue();
        self.pending = Some(PendingRoute {
            ticket,
            return_to_start: request.return_to_start,
        });
        self.loading = true;
        effects.push(Effect::RefreshMapLayout);
        effects.push(Effect::GenerateRoute { ticket, request });
    }

    fn fail_route(&mut self, err: ClientError, effects: &mut Vec<Effect>) {
        tracing::warn!("route generation failed: {err}");
        self.loading = false;
        self.go_to(Screen::Settings);
        effects.push(Effect::Alert(format!("Could not build the route: {err}")));
    }

    fn reset(&mut self) {
        tracing::info!("starting a new route");
        self.profile = self
            .config
            .as_ref()
            .map(|c| UserProfile::with_defaults(&c.walk_settings))
            .unwrap_or_default();
        self.intro = IntroForm::default();
        self.interests = InterestsForm::default();
        self.location = LocationStatus::Idle;
        self.loading = false;
        self.pending = None;
        self.shown = None;
        self.sessions.issue();
        self.requests.issue();
        self.map.clear();
        self.panel.clear();
        self.go_to(Screen::Welcome);
    }

    pub fn config(&self) -> Option<&AppConfig> {
        self.config.as_ref()
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn intro(&self) -> &IntroForm {
        &self.intro
    }

    pub fn interests(&self) -> &InterestsForm {
        &self.interests
    }

    pub fn location_status(&self) -> LocationStatus {
        self.location
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn map(&self) -> &MapView<A> {
        &self.map
    }

    pub fn panel(&self) -> &RoutePanel {
        &self.panel
    }
}

#[cfg(test)]
mod tests {
    use shared::{Coordinate, SettingRange, WalkSettings};

    use super::*;
    use crate::map::testing::{map_settings, route, MapCall, RecordingMap};
    use crate::map::{MarkerKind, FIT_PADDING_PX};

    fn config() -> AppConfig {
        AppConfig {
            app_name: Some("Volga Walks".into()),
            privacy_policy_url: "https://example.org/privacy".into(),
            walk_settings: WalkSettings {
                duration: SettingRange { default: 3, min: 1, max: 8, step: None },
                radius: SettingRange { default: 3.0, min: 0.5, max: 10.0, step: Some(0.5) },
                places_count: SettingRange { default: 3, min: 2, max: 7, step: None },
            },
            map: map_settings(),
        }
    }

    fn booted() -> App<RecordingMap> {
        let mut app = App::new(RecordingMap::default());
        assert_eq!(app.boot(), vec![Effect::LoadConfig]);
        app.update(Msg::ConfigLoaded(Ok(config())));
        app
    }

    /// Walks the form screens up to Settings with the location resolved.
    fn at_settings() -> App<RecordingMap> {
        let mut app = booted();
        app.update(Msg::Start);
        app.update(Msg::NameChanged("Anna".into()));
        app.update(Msg::AgeChanged("29".into()));
        app.update(Msg::SubmitIntro);
        app.update(Msg::InterestsChanged("street art and old churches".into()));
        let effects = app.update(Msg::SubmitInterests);
        let session = match effects.as_slice() {
            [Effect::RequestLocation(session)] => *session,
            other => panic!("unexpected effects {other:?}"),
        };
        app.update(Msg::LocationResolved {
            session,
            outcome: LocationOutcome::Located { lat: 56.31, lon: 44.01 },
        });
        app
    }

    fn submit(app: &mut App<RecordingMap>) -> Ticket {
        match app.update(Msg::SubmitSettings).as_slice() {
            [Effect::RefreshMapLayout, Effect::GenerateRoute { ticket, .. }] => *ticket,
            other => panic!("unexpected effects {other:?}"),
        }
    }

    fn at_map(places: usize) -> App<RecordingMap> {
        let mut app = at_settings();
        let ticket = submit(&mut app);
        app.update(Msg::RouteFetched {
            ticket,
            result: Ok(route(places)),
        });
        app
    }

    #[test]
    fn test_linear_flow_reaches_settings() {
        let app = at_settings();
        assert_eq!(app.screen(), Screen::Settings);
        assert_eq!(app.profile().name, "Anna");
        assert_eq!(app.profile().age, Some(29));
        assert_eq!(app.profile().location(), Some(Coordinate::new(56.31, 44.01)));
        assert_eq!(app.location_status(), LocationStatus::Located);
    }

    #[test]
    fn test_incomplete_forms_block_progress() {
        let mut app = booted();
        app.update(Msg::Start);
        app.update(Msg::NameChanged("  ".into()));
        app.update(Msg::AgeChanged("40".into()));
        app.update(Msg::SubmitIntro);
        assert_eq!(app.screen(), Screen::Intro);

        app.update(Msg::NameChanged("Oleg".into()));
        app.update(Msg::SubmitIntro);
        assert_eq!(app.screen(), Screen::Interests);

        app.update(Msg::InterestsChanged("boats".into()));
        assert!(app.update(Msg::SubmitInterests).is_empty());
        assert_eq!(app.screen(), Screen::Interests);
    }

    #[test]
    fn test_config_failure_leaves_defaults_unset() {
        let mut app = App::new(RecordingMap::default());
        app.update(Msg::ConfigLoaded(Err(ClientError::Network("offline".into()))));
        assert!(app.config().is_none());
        assert_eq!(app.profile().duration, None);
    }

    #[test]
    fn test_location_failure_uses_config_center() {
        let mut app = booted();
        app.update(Msg::LocationResolved {
            session: Ticket(0),
            outcome: LocationOutcome::Failed { message: "denied".into() },
        });
        assert_eq!(app.profile().location(), Some(config().map.center()));
        assert_eq!(app.location_status(), LocationStatus::Failed);
    }

    #[test]
    fn test_settings_changes_are_committed() {
        let mut app = at_settings();
        app.update(Msg::SettingsChanged(SettingsInput::Duration("5".into())));
        app.update(Msg::SettingsChanged(SettingsInput::Radius("2.5".into())));
        app.update(Msg::SettingsChanged(SettingsInput::PlacesCount("6".into())));
        app.update(Msg::SettingsChanged(SettingsInput::ReturnToStart(true)));

        let effects = app.update(Msg::SubmitSettings);
        match effects.as_slice() {
            [Effect::RefreshMapLayout, Effect::GenerateRoute { request, .. }] => {
                assert_eq!(request.duration, 5);
                assert_eq!(request.radius, 2.5);
                assert_eq!(request.places_count, 6);
                assert!(request.return_to_start);
                assert_eq!(request.interests, "street art and old churches");
            }
            other => panic!("unexpected effects {other:?}"),
        }
        assert!(app.is_loading());
        assert_eq!(app.screen(), Screen::Map);
    }

    #[test]
    fn test_map_is_initialized_once() {
        let mut app = at_map(2);
        app.update(Msg::NewRouteConfirmed);
        app.go_to(Screen::Map);
        assert_eq!(app.map().adapter().count(|c| *c == MapCall::Init), 1);
    }

    #[test]
    fn test_map_is_measured_after_it_becomes_visible() {
        let mut app = at_settings();
        submit(&mut app);
        assert_eq!(app.map().adapter().calls, vec![MapCall::Init]);

        app.update(Msg::MapLaidOut);
        assert_eq!(
            app.map().adapter().calls,
            vec![MapCall::Init, MapCall::InvalidateSize]
        );

        app.update(Msg::NewRouteConfirmed);
        app.update(Msg::MapLaidOut);
        assert_eq!(app.map().adapter().count(|c| *c == MapCall::InvalidateSize), 1);
    }

    #[test]
    fn test_second_submit_while_pending_is_ignored() {
        let mut app = at_settings();
        submit(&mut app);
        assert!(app.update(Msg::SubmitSettings).is_empty());
    }

    #[test]
    fn test_route_renders_markers_and_cards() {
        let app = at_map(4);
        assert!(!app.is_loading());
        assert_eq!(app.screen(), Screen::Map);
        assert_eq!(app.map().marker_count(), 5);
        assert_eq!(app.map().adapter().live.len(), 5);
        assert_eq!(app.panel().places().len(), 4);
        for (i, place) in app.panel().places().iter().enumerate() {
            let marker = app.map().adapter().live.values().nth(i + 1).unwrap();
            assert_eq!(marker.kind, MarkerKind::Place { index: i });
            assert_eq!(marker.title, place.name);
        }
    }

    #[test]
    fn test_fit_runs_after_delay_for_current_route() {
        let mut app = at_settings();
        let ticket = submit(&mut app);
        let effects = app.update(Msg::RouteFetched {
            ticket,
            result: Ok(route(3)),
        });
        assert_eq!(
            effects,
            vec![Effect::ScheduleFit { ticket, delay_ms: FIT_DELAY_MS }]
        );
        app.update(Msg::FitViewport(ticket));
        let bounds = route(3).bounds().unwrap();
        assert_eq!(
            app.map().adapter().calls.last(),
            Some(&MapCall::FitBounds(bounds, FIT_PADDING_PX))
        );
    }

    #[test]
    fn test_card_and_marker_clicks_stay_in_sync() {
        let n = 4;
        let mut app = at_map(n);
        for i in [0, n - 1] {
            app.update(Msg::CardClicked(i));
            assert_eq!(app.panel().active(), Some(i));
            assert_eq!(
                app.map().adapter().last_opened().map(|m| m.kind),
                Some(MarkerKind::Place { index: i })
            );
            let place = &app.panel().places()[i];
            assert!(app
                .map()
                .adapter()
                .calls
                .contains(&MapCall::SetView(place.coordinate(), 16)));

            let other = n - 1 - i;
            let effects = app.update(Msg::MarkerClicked(other));
            assert_eq!(effects, vec![Effect::ScrollToCard(other)]);
            assert_eq!(app.panel().active(), Some(other));
        }
    }

    #[test]
    fn test_error_response_returns_to_settings() {
        let mut app = at_settings();
        let ticket = submit(&mut app);
        assert!(app.is_loading());

        let effects = app.update(Msg::RouteFetched {
            ticket,
            result: Err(crate::api::failure_from_body(400, r#"{"error":"x"}"#)),
        });
        assert!(!app.is_loading());
        assert_eq!(app.screen(), Screen::Settings);
        assert_eq!(
            effects,
            vec![Effect::Alert("Could not build the route: x".into())]
        );
    }

    #[test]
    fn test_network_error_returns_to_settings() {
        let mut app = at_settings();
        let ticket = submit(&mut app);
        let effects = app.update(Msg::RouteFetched {
            ticket,
            result: Err(ClientError::Network("TypeError: Failed to fetch".into())),
        });
        assert!(!app.is_loading());
        assert_eq!(app.screen(), Screen::Settings);
        assert!(matches!(effects.as_slice(), [Effect::Alert(text)] if text.contains("Failed to fetch")));

        assert!(matches!(
            app.update(Msg::SubmitSettings).as_slice(),
            [Effect::RefreshMapLayout, Effect::GenerateRoute { .. }]
        ));
    }

    #[test]
    fn test_submit_without_location_is_rejected() {
        let mut app = booted();
        app.update(Msg::Start);
        app.update(Msg::NameChanged("Anna".into()));
        app.update(Msg::AgeChanged("29".into()));
        app.update(Msg::SubmitIntro);
        app.update(Msg::InterestsChanged("street art and old churches".into()));
        app.update(Msg::SubmitInterests);
        assert_eq!(app.location_status(), LocationStatus::Pending);

        let effects = app.update(Msg::SubmitSettings);
        assert_eq!(
            effects,
            vec![Effect::Alert(
                "Could not build the route: location is not known yet".into()
            )]
        );
        assert_eq!(app.screen(), Screen::Settings);
        assert!(!app.is_loading());
    }

    #[test]
    fn test_submit_without_config_reports_missing_settings() {
        let mut app = App::new(RecordingMap::default());
        app.update(Msg::ConfigLoaded(Err(ClientError::Network("offline".into()))));
        app.update(Msg::Start);
        app.update(Msg::NameChanged("Anna".into()));
        app.update(Msg::AgeChanged("29".into()));
        app.update(Msg::SubmitIntro);
        app.update(Msg::InterestsChanged("street art and old churches".into()));
        app.update(Msg::SubmitInterests);
        app.update(Msg::LocationResolved {
            session: Ticket(0),
            outcome: LocationOutcome::Located { lat: 1.0, lon: 2.0 },
        });
        let effects = app.update(Msg::SubmitSettings);
        assert!(matches!(effects.as_slice(), [Effect::Alert(_)]));
        assert_eq!(app.screen(), Screen::Settings);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut app = at_map(3);
        app.update(Msg::SettingsChanged(SettingsInput::Duration("6".into())));
        assert_eq!(app.update(Msg::NewRouteRequested), vec![Effect::ConfirmNewRoute]);
        assert_eq!(app.screen(), Screen::Map);

        app.update(Msg::NewRouteConfirmed);
        assert_eq!(app.screen(), Screen::Welcome);
        assert_eq!(
            *app.profile(),
            UserProfile::with_defaults(&config().walk_settings)
        );
        assert_eq!(app.map().marker_count(), 0);
        assert!(app.map().adapter().live.is_empty());
        assert!(!app.map().has_overlay());
        assert!(app.panel().places().is_empty());
        assert_eq!(*app.intro(), IntroForm::default());
        assert_eq!(app.interests().char_count(), 0);
        assert_eq!(app.location_status(), LocationStatus::Idle);
    }

    #[test]
    fn test_stale_route_after_reset_is_dropped() {
        let mut app = at_settings();
        let ticket = submit(&mut app);
        app.update(Msg::NewRouteConfirmed);

        let effects = app.update(Msg::RouteFetched {
            ticket,
            result: Ok(route(3)),
        });
        assert!(effects.is_empty());
        assert_eq!(app.screen(), Screen::Welcome);
        assert_eq!(app.map().marker_count(), 0);
        assert!(app.panel().places().is_empty());
    }

    #[test]
    fn test_stale_location_after_reset_is_dropped() {
        let mut app = booted();
        app.update(Msg::Start);
        app.update(Msg::NameChanged("Anna".into()));
        app.update(Msg::AgeChanged("29".into()));
        app.update(Msg::SubmitIntro);
        app.update(Msg::InterestsChanged("street art and old churches".into()));
        let session = match app.update(Msg::SubmitInterests).as_slice() {
            [Effect::RequestLocation(session)] => *session,
            other => panic!("unexpected effects {other:?}"),
        };
        app.update(Msg::NewRouteConfirmed);
        app.update(Msg::LocationResolved {
            session,
            outcome: LocationOutcome::Located { lat: 1.0, lon: 2.0 },
        });
        assert_eq!(app.profile().location(), None);
        assert_eq!(app.location_status(), LocationStatus::Idle);
    }

    #[test]
    fn test_stale_fit_is_ignored() {
        let mut app = at_settings();
        let ticket = submit(&mut app);
        app.update(Msg::RouteFetched {
            ticket,
            result: Ok(route(2)),
        });
        app.update(Msg::NewRouteConfirmed);
        app.update(Msg::FitViewport(ticket));
        assert_eq!(
            app.map()
                .adapter()
                .count(|c| matches!(c, MapCall::FitBounds(..))),
            0
        );
    }

    #[test]
    fn test_return_to_start_controls_last_waypoint() {
        for return_to_start in [false, true] {
            let mut app = at_settings();
            app.update(Msg::SettingsChanged(SettingsInput::ReturnToStart(
                return_to_start,
            )));
            let ticket = submit(&mut app);
            let result = route(3);
            let user = result.user_location;
            app.update(Msg::RouteFetched {
                ticket,
                result: Ok(result),
            });
            let waypoints = app.map().adapter().overlay.clone().unwrap();
            assert_eq!(waypoints[0], user);
            assert_eq!(waypoints.last() == Some(&user), return_to_start);
        }
    }
}
