pub mod api;
pub mod app;
mod bridge;
pub mod error;
pub mod forms;
pub mod geolocation;
pub mod leaflet;
pub mod map;
pub mod panel;
mod view;

use seed::{prelude::*, *};
use serde::Deserialize;
use wasm_bindgen::{prelude::wasm_bindgen, JsCast};

use crate::app::{App, Effect, Msg, Ticket};
use crate::geolocation::LocationEvent;
use crate::leaflet::LeafletMap;

pub struct Model {
    app: App<LeafletMap>,
}

#[derive(Deserialize)]
struct MarkerClickPayload {
    index: usize,
}

pub fn init(_: Url, orders: &mut impl Orders<Msg>) -> Model {
    orders.stream(streams::window_event(
        Ev::from(bridge::MARKER_CLICK_EVENT),
        |event| {
            let payload: MarkerClickPayload = event_detail(event)?;
            tracing::debug!(index = payload.index, "marker clicked");
            Some(Msg::MarkerClicked(payload.index))
        },
    ));
    orders.stream(streams::window_event(
        Ev::from(bridge::LOCATION_EVENT),
        |event| {
            let payload: LocationEvent = event_detail(event)?;
            Some(Msg::LocationResolved {
                session: Ticket(payload.session),
                outcome: payload.outcome,
            })
        },
    ));

    let app = App::new(LeafletMap);
    run_effects(app.boot(), orders);
    Model { app }
}

pub fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    let effects = model.app.update(msg);
    run_effects(effects, orders);
}

fn run_effects(effects: Vec<Effect>, orders: &mut impl Orders<Msg>) {
    for effect in effects {
        match effect {
            Effect::LoadConfig => {
                orders.perform_cmd(async { Msg::ConfigLoaded(api::fetch_config().await) });
            }
            Effect::RequestLocation(session) => geolocation::request(session.0),
            Effect::RefreshMapLayout => {
                orders.after_next_render(|_| Msg::MapLaidOut);
            }
            Effect::GenerateRoute { ticket, request } => {
                orders.perform_cmd(async move {
                    let result = api::generate_route(&request).await;
                    Msg::RouteFetched { ticket, result }
                });
            }
            Effect::ScheduleFit { ticket, delay_ms } => {
                orders.perform_cmd(cmds::timeout(delay_ms, move || Msg::FitViewport(ticket)));
            }
            Effect::ScrollToCard(index) => bridge::scroll_card_into_view(index as u32),
            Effect::Alert(message) => {
                if window().alert_with_message(&message).is_err() {
                    tracing::error!("cannot show alert: {message}");
                }
            }
            Effect::ConfirmNewRoute => {
                let confirmed = window()
                    .confirm_with_message("Do you want to plan a new route?")
                    .unwrap_or(false);
                if confirmed {
                    orders.send_msg(Msg::NewRouteConfirmed);
                }
            }
        }
    }
}

fn event_detail<T: for<'de> Deserialize<'de>>(event: web_sys::Event) -> Option<T> {
    let event = event.dyn_into::<web_sys::CustomEvent>().ok()?;
    match serde_wasm_bindgen::from_value(event.detail()) {
        Ok(payload) => Some(payload),
        Err(err) => {
            tracing::warn!("malformed {} event: {err}", event.type_());
            None
        }
    }
}

pub fn view(model: &Model) -> Node<Msg> {
    view::view(&model.app)
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    seed::App::start("app", init, update, view);
}
