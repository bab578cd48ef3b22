use seed::{prelude::*, virtual_dom::AtValue, *};
use shared::{Place, SettingRange};

use crate::app::{App, Msg, Screen};
use crate::forms::{SettingsInput, INTERESTS_MAX_CHARS};
use crate::map::MapAdapter;

const DEFAULT_TITLE: &str = "Walking route planner";

pub fn view<A: MapAdapter>(app: &App<A>) -> Node<Msg> {
    div![
        C!["app-container"],
        Screen::ALL.iter().map(|&screen| {
            let content = match screen {
                Screen::Welcome => view_welcome(app),
                Screen::Intro => view_intro(app),
                Screen::Interests => view_interests(app),
                Screen::Settings => view_settings(app),
                Screen::Map => view_map(app),
            };
            section![
                C!["screen", IF!(app.screen() == screen => "active")],
                attrs! { At::Id => screen.element_id() },
                content,
            ]
        }),
        div![
            C!["loading-overlay", IF!(!app.is_loading() => "hidden")],
            div![C!["spinner"]],
            p!["Building your route..."],
        ],
    ]
}

fn view_welcome<A: MapAdapter>(app: &App<A>) -> Node<Msg> {
    let config = app.config();
    let title = config
        .and_then(|c| c.app_name.as_deref())
        .unwrap_or(DEFAULT_TITLE);

    div![
        C!["welcome"],
        h1![title],
        p!["Tell us a little about yourself and we will plan a walk through the places you will enjoy."],
        button![
            C!["primary-btn"],
            "Let's go",
            ev(Ev::Click, |_| Msg::Start),
        ],
        config.map(|c| {
            small![
                C!["privacy"],
                "By continuing you accept the ",
                a![
                    attrs! {
                        At::Href => c.privacy_policy_url.as_str(),
                        At::Target => "_blank",
                        At::Rel => "noopener",
                    },
                    "privacy policy",
                ],
            ]
        }),
    ]
}

fn view_intro<A: MapAdapter>(app: &App<A>) -> Node<Msg> {
    let form = app.intro();
    form![
        C!["screen-form"],
        ev(Ev::Submit, |event| {
            event.prevent_default();
            Msg::SubmitIntro
        }),
        h2!["Nice to meet you"],
        label!["Name"],
        input![
            attrs! {
                At::Type => "text",
                At::Value => form.name.as_str(),
                At::AutoComplete => "off",
            },
            input_ev(Ev::Input, Msg::NameChanged),
        ],
        label!["Age"],
        input![
            attrs! {
                At::Type => "number",
                At::Min => "0",
                At::Value => form.age.as_str(),
            },
            input_ev(Ev::Input, Msg::AgeChanged),
        ],
        button![
            C!["primary-btn"],
            "Next",
            attrs! {
                At::Type => "submit",
                At::Disabled => bool_attr(!form.can_advance()),
            },
        ],
    ]
}

fn view_interests<A: MapAdapter>(app: &App<A>) -> Node<Msg> {
    let form = app.interests();
    form![
        C!["screen-form"],
        ev(Ev::Submit, |event| {
            event.prevent_default();
            Msg::SubmitInterests
        }),
        h2!["What are you into?"],
        textarea![
            attrs! {
                At::Value => form.text(),
                At::MaxLength => INTERESTS_MAX_CHARS.to_string(),
                At::Placeholder => "Architecture, street art, river views...",
            },
            input_ev(Ev::Input, Msg::InterestsChanged),
        ],
        small![
            C!["char-counter"],
            format!("{} / {INTERESTS_MAX_CHARS}", form.char_count()),
        ],
        button![
            C!["primary-btn"],
            "Next",
            attrs! {
                At::Type => "submit",
                At::Disabled => bool_attr(!form.can_advance()),
            },
        ],
    ]
}

fn view_settings<A: MapAdapter>(app: &App<A>) -> Node<Msg> {
    let profile = app.profile();
    let status = app.location_status();
    let return_to_start = profile.return_to_start;

    let sliders = app.config().map(|config| {
        let walk = &config.walk_settings;
        vec![
            slider(
                "Duration, h",
                &walk.duration,
                profile.duration.unwrap_or(walk.duration.default),
                "1",
                |v| Msg::SettingsChanged(SettingsInput::Duration(v)),
            ),
            slider(
                "Radius, km",
                &walk.radius,
                profile.radius.unwrap_or(walk.radius.default),
                "any",
                |v| Msg::SettingsChanged(SettingsInput::Radius(v)),
            ),
            div![
                C!["setting"],
                label!["Number of places"],
                select![
                    (walk.places_count.min..=walk.places_count.max).map(|n| {
                        option![
                            attrs! {
                                At::Value => n.to_string(),
                                At::Selected => bool_attr(profile.places_count == Some(n)),
                            },
                            n.to_string(),
                        ]
                    }),
                    input_ev(Ev::Change, |v| {
                        Msg::SettingsChanged(SettingsInput::PlacesCount(v))
                    }),
                ],
            ],
        ]
    });

    form![
        C!["screen-form"],
        ev(Ev::Submit, |event| {
            event.prevent_default();
            Msg::SubmitSettings
        }),
        h2!["Your walk"],
        status.banner().map(|text| {
            div![
                C![
                    "location-status",
                    IF!(status.is_error() => "error"),
                    IF!(status == crate::geolocation::LocationStatus::Located => "success"),
                ],
                text,
            ]
        }),
        sliders,
        label![
            C!["checkbox"],
            input![
                attrs! {
                    At::Type => "checkbox",
                    At::Checked => bool_attr(return_to_start),
                },
                ev(Ev::Change, move |_| {
                    Msg::SettingsChanged(SettingsInput::ReturnToStart(!return_to_start))
                }),
            ],
            span!["Return to the starting point"],
        ],
        button![
            C!["primary-btn"],
            "Build the route",
            attrs! { At::Type => "submit" },
        ],
    ]
}

fn slider<T: ToString + Copy>(
    label: &str,
    range: &SettingRange<T>,
    value: T,
    default_step: &str,
    msg: fn(String) -> Msg,
) -> Node<Msg> {
    div![
        C!["setting"],
        label![label, ": ", strong![value.to_string()]],
        input![
            attrs! {
                At::Type => "range",
                At::Min => range.min.to_string(),
                At::Max => range.max.to_string(),
                At::Step => range.step.map_or_else(|| default_step.to_string(), |s| s.to_string()),
                At::Value => value.to_string(),
            },
            input_ev(Ev::Input, msg),
        ],
    ]
}

fn view_map<A: MapAdapter>(app: &App<A>) -> Node<Msg> {
    let panel = app.panel();
    div![
        C!["map-screen"],
        div![attrs! { At::Id => "map" }],
        div![
            C!["route-panel", IF!(panel.is_collapsed() => "collapsed")],
            div![
                C!["panel-header"],
                ev(Ev::Click, |_| Msg::TogglePanel),
                h3!["Your route"],
                span![
                    C!["panel-toggle"],
                    if panel.is_collapsed() { "▲" } else { "▼" }
                ],
            ],
            div![
                C!["route-summary"],
                span![panel.distance_label().unwrap_or_default()],
                span![panel.time_label().unwrap_or_default()],
            ],
            div![
                C!["places-list"],
                panel
                    .places()
                    .iter()
                    .enumerate()
                    .map(|(index, place)| view_place_card(index, place, panel.active() == Some(index))),
            ],
            button![
                C!["secondary-btn"],
                "Start a new route",
                ev(Ev::Click, |_| Msg::NewRouteRequested),
            ],
        ],
    ]
}

/// Backend strings are inserted as text nodes, so markup in them is shown
/// literally rather than interpreted.
fn view_place_card(index: usize, place: &Place, active: bool) -> Node<Msg> {
    div![
        C!["place-card", IF!(active => "active")],
        attrs! { At::from("data-index") => index.to_string() },
        ev(Ev::Click, move |_| Msg::CardClicked(index)),
        div![
            C!["place-header"],
            span![C!["place-number"], (index + 1).to_string()],
            span![C!["place-name"], place.name.as_str()],
        ],
        div![C!["place-address"], place.address.as_str()],
        place
            .distance_from_user
            .map(|km| small![C!["place-distance"], format!("{km:.2} km from you")]),
        div![
            C!["place-reason"],
            strong!["Why you should visit:"],
            br![],
            place.ai_reason.as_str(),
        ],
    ]
}

fn bool_attr(value: bool) -> AtValue {
    if value {
        AtValue::Some("true".into())
    } else {
        AtValue::Ignored
    }
}
