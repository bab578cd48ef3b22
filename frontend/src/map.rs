//! Map rendering behind a provider-neutral adapter.
//!
//! [`MapView`] owns the markers and the walking-path overlay of the route on
//! display. It only talks to the map through [`MapAdapter`], so the Leaflet
//! binding in `leaflet.rs` can be swapped for a recording fake in tests.

use serde::Serialize;
use shared::{Coordinate, MapSettings, Place, RouteBounds, RouteResult};

use crate::error::ClientError;

pub const USER_MARKER_TITLE: &str = "Your location";
pub const FIT_PADDING_PX: u32 = 80;
pub const FIT_DELAY_MS: u32 = 500;
pub const FOCUS_ZOOM: u8 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MarkerKind {
    User,
    Place { index: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSpec {
    pub position: Coordinate,
    /// Short text drawn inside the marker icon.
    pub label: String,
    pub title: String,
    /// Plain text, never markup.
    pub popup: String,
    #[serde(flatten)]
    pub kind: MarkerKind,
}

impl MarkerSpec {
    pub fn user(position: Coordinate) -> Self {
        Self {
            position,
            label: "👤".into(),
            title: USER_MARKER_TITLE.into(),
            popup: USER_MARKER_TITLE.into(),
            kind: MarkerKind::User,
        }
    }

    pub fn place(index: usize, place: &Place) -> Self {
        Self {
            position: place.coordinate(),
            label: (index + 1).to_string(),
            title: place.name.clone(),
            popup: place.name.clone(),
            kind: MarkerKind::Place { index },
        }
    }
}

pub trait MapAdapter {
    fn init_map(&mut self, settings: &MapSettings);
    /// Re-measures the map container. Must run once the container is laid
    /// out, since a map created inside a hidden element sizes itself 0x0.
    fn invalidate_size(&mut self);
    fn add_marker(&mut self, spec: &MarkerSpec) -> MarkerId;
    fn remove_marker(&mut self, id: MarkerId);
    /// Asks the external walking router for a path through `waypoints`, in
    /// order, and draws it. The router must not add markers, instructions or
    /// draggable waypoints of its own.
    fn compute_walking_path(&mut self, waypoints: &[Coordinate]);
    fn clear_overlay(&mut self);
    fn fit_bounds(&mut self, bounds: &RouteBounds, padding_px: u32);
    fn set_view(&mut self, center: Coordinate, zoom: u8);
    fn open_popup(&mut self, id: MarkerId);
}

/// User location, then every place in server order, then the user location
/// again when the walk returns to its start.
pub fn walking_waypoints(
    user: Coordinate,
    places: &[Place],
    return_to_start: bool,
) -> Vec<Coordinate> {
    let mut waypoints = Vec::with_capacity(places.len() + 2);
    waypoints.push(user);
    waypoints.extend(places.iter().map(Place::coordinate));
    if return_to_start {
        waypoints.push(user);
    }
    waypoints
}

pub struct MapView<A> {
    adapter: A,
    initialized: bool,
    /// Index 0 is the user marker, index `i + 1` the marker of place `i`.
    markers: Vec<MarkerId>,
    has_overlay: bool,
    bounds: Option<RouteBounds>,
}

impl<A: MapAdapter> MapView<A> {
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            initialized: false,
            markers: Vec::new(),
            has_overlay: false,
            bounds: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Creates the map the first time it is called with settings available.
    pub fn ensure_initialized(&mut self, settings: Option<&MapSettings>) -> bool {
        if self.initialized {
            return true;
        }
        match settings {
            Some(settings) => {
                tracing::debug!(zoom = settings.default_zoom, "initializing map");
                self.adapter.init_map(settings);
                self.initialized = true;
            }
            None => tracing::warn!("map settings unavailable, map not initialized"),
        }
        self.initialized
    }

    /// Called after the Map screen has been rendered visible.
    pub fn refresh_layout(&mut self) {
        if self.initialized {
            self.adapter.invalidate_size();
        }
    }

    pub fn show_route(
        &mut self,
        route: &RouteResult,
        return_to_start: bool,
    ) -> Result<(), ClientError> {
        if !self.initialized {
            return Err(ClientError::MapUnavailable);
        }
        self.clear();

        self.markers
            .push(self.adapter.add_marker(&MarkerSpec::user(route.user_location)));
        for (index, place) in route.route.iter().enumerate() {
            let id = self.adapter.add_marker(&MarkerSpec::place(index, place));
            self.markers.push(id);
        }

        if !route.route.is_empty() {
            let waypoints = walking_waypoints(route.user_location, &route.route, return_to_start);
            tracing::debug!(waypoints = waypoints.len(), "computing walking path");
            self.adapter.compute_walking_path(&waypoints);
            self.has_overlay = true;
        }
        self.bounds = route.bounds();
        Ok(())
    }

    /// Fits the viewport to the places of the route on display, if any.
    pub fn fit_to_route(&mut self) {
        if let Some(bounds) = self.bounds {
            self.adapter.fit_bounds(&bounds, FIT_PADDING_PX);
        }
    }

    pub fn focus_place(&mut self, index: usize, position: Coordinate) {
        if let Some(&id) = self.markers.get(index + 1) {
            self.adapter.set_view(position, FOCUS_ZOOM);
            self.adapter.open_popup(id);
        }
    }

    /// Removes every marker and the path overlay. Safe to call repeatedly.
    pub fn clear(&mut self) {
        for id in self.markers.drain(..) {
            self.adapter.remove_marker(id);
        }
        if self.has_overlay {
            self.adapter.clear_overlay();
            self.has_overlay = false;
        }
        self.bounds = None;
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn has_overlay(&self) -> bool {
        self.has_overlay
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }
}
