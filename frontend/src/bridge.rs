//! Bindings to `walk_map.js`, the glue around Leaflet, Leaflet Routing
//! Machine and the browser geolocation API.

use serde::Serialize;
use wasm_bindgen::prelude::{wasm_bindgen, JsValue};

#[wasm_bindgen(module = "/walk_map.js")]
extern "C" {
    #[wasm_bindgen(js_name = initMap)]
    pub fn init_map(settings: JsValue);
    #[wasm_bindgen(js_name = invalidateSize)]
    pub fn invalidate_size();
    #[wasm_bindgen(js_name = addMarker)]
    pub fn add_marker(spec: JsValue) -> u32;
    #[wasm_bindgen(js_name = removeMarker)]
    pub fn remove_marker(id: u32);
    #[wasm_bindgen(js_name = drawWalkingRoute)]
    pub fn draw_walking_route(waypoints: JsValue, options: JsValue);
    #[wasm_bindgen(js_name = clearRouteOverlay)]
    pub fn clear_route_overlay();
    #[wasm_bindgen(js_name = fitBounds)]
    pub fn fit_bounds(bounds: JsValue, padding: u32);
    #[wasm_bindgen(js_name = setView)]
    pub fn set_view(center: JsValue, zoom: u8);
    #[wasm_bindgen(js_name = openPopup)]
    pub fn open_popup(id: u32);
    #[wasm_bindgen(js_name = scrollCardIntoView)]
    pub fn scroll_card_into_view(index: u32);
    #[wasm_bindgen(js_name = requestLocation)]
    pub fn request_location(session: u32);
}

pub const MARKER_CLICK_EVENT: &str = "walk-marker-click";
pub const LOCATION_EVENT: &str = "walk-location";

/// Serializes maps as plain objects so the glue can read fields directly.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}
