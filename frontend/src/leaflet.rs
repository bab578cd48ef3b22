use serde::Serialize;
use shared::{Coordinate, MapSettings, RouteBounds};

use crate::bridge::{self, to_js};
use crate::map::{MapAdapter, MarkerId, MarkerSpec};

pub const OSRM_SERVICE_URL: &str = "https://router.project-osrm.org/route/v1";
pub const WALKING_PROFILE: &str = "foot";

/// Options handed to `L.Routing.control`. The glue always disables the
/// router's own markers, instruction panel and waypoint dragging.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct RoutingOptions {
    service_url: &'static str,
    profile: &'static str,
    line_color: &'static str,
    line_opacity: f64,
    line_weight: u32,
}

const ROUTING: RoutingOptions = RoutingOptions {
    service_url: OSRM_SERVICE_URL,
    profile: WALKING_PROFILE,
    line_color: "#2563eb",
    line_opacity: 0.8,
    line_weight: 5,
};

/// Map adapter backed by Leaflet.
#[derive(Debug, Default)]
pub struct LeafletMap;

impl MapAdapter for LeafletMap {
    fn init_map(&mut self, settings: &MapSettings) {
        match to_js(settings) {
            Ok(value) => bridge::init_map(value),
            Err(err) => tracing::error!("cannot pass map settings to JS: {err}"),
        }
    }

    fn invalidate_size(&mut self) {
        bridge::invalidate_size();
    }

    fn add_marker(&mut self, spec: &MarkerSpec) -> MarkerId {
        match to_js(spec) {
            Ok(value) => MarkerId(bridge::add_marker(value)),
            Err(err) => {
                tracing::error!("cannot pass marker to JS: {err}");
                MarkerId(0)
            }
        }
    }

    fn remove_marker(&mut self, id: MarkerId) {
        bridge::remove_marker(id.0);
    }

    fn compute_walking_path(&mut self, waypoints: &[Coordinate]) {
        match (to_js(waypoints), to_js(&ROUTING)) {
            (Ok(points), Ok(options)) => bridge::draw_walking_route(points, options),
            (Err(err), _) | (_, Err(err)) => {
                tracing::error!("cannot pass waypoints to JS: {err}")
            }
        }
    }

    fn clear_overlay(&mut self) {
        bridge::clear_route_overlay();
    }

    fn fit_bounds(&mut self, bounds: &RouteBounds, padding_px: u32) {
        match to_js(bounds) {
            Ok(value) => bridge::fit_bounds(value, padding_px),
            Err(err) => tracing::error!("cannot pass bounds to JS: {err}"),
        }
    }

    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        match to_js(&center) {
            Ok(value) => bridge::set_view(value, zoom),
            Err(err) => tracing::error!("cannot pass view center to JS: {err}"),
        }
    }

    fn open_popup(&mut self, id: MarkerId) {
        bridge::open_popup(id.0);
    }
}
