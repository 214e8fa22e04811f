use dioxus::prelude::*;

use crate::gui::{
    components::Card,
    hooks::use_dashboard,
    styles::theme::CssClasses,
    utils::{format_points, initial_of},
};
use crate::models::FanActivityEvent;

/// ファンアクティビティカード（新しい順、最大5件）
#[component]
pub fn FanActivityCard() -> Element {
    let dashboard = use_dashboard();
    let activities = dashboard.snapshot.read().fan_activity.clone();

    rsx! {
        Card {
            title: "Live Fan Activity".to_string(),
            icon: "⚡".to_string(),

            for activity in activities {
                FanActivityItem { key: "{activity.id}", activity: activity.clone() }
            }
        }
    }
}

#[component]
fn FanActivityItem(activity: FanActivityEvent) -> Element {
    let initial = initial_of(&activity.name);

    rsx! {
        div {
            class: CssClasses::FAN_ITEM,

            div { class: CssClasses::FAN_AVATAR, "{initial}" }
            span { "{activity.name}" }

            if let Some(action) = activity.action.as_ref() {
                span { class: CssClasses::FAN_POINTS, "{action}" }
            } else {
                span { class: CssClasses::FAN_POINTS, {format_points(activity.points)} }
            }
        }
    }
}
