use dioxus::prelude::*;

use crate::data::StaticTables;
use crate::gui::components::StatTile;

/// ドライバーのモナコ成績カード
#[component]
pub fn DriverStatsCard() -> Element {
    let tables = use_context::<StaticTables>();
    let driver = tables.monaco.driver.clone();

    rsx! {
        div {
            style: "background: #0A0A0A; border: 1px solid rgba(0,176,169,0.2); border-radius: 12px; padding: 12px; margin-bottom: 12px;",

            div {
                style: "display: flex; align-items: center; gap: 8px; margin-bottom: 8px;",
                div {
                    style: "width: 24px; height: 24px; border-radius: 50%; display: flex; align-items: center; justify-content: center; font-size: 12px; font-weight: 700; background: linear-gradient(135deg, #00C39A, #00B0A9);",
                    "{driver.number}"
                }
                div {
                    div { style: "font-size: 12px; font-weight: 700;", "{driver.name}" }
                    div { style: "font-size: 9px; color: #00C39A;", "{driver.team}" }
                }
                span {
                    style: "margin-left: auto; font-size: 8px; font-weight: 700; padding: 2px 6px; border-radius: 4px; background: #00C39A;",
                    "MONACO '25"
                }
            }

            div {
                style: "display: grid; grid-template-columns: repeat(3, 1fr); gap: 6px; font-size: 9px;",
                StatTile { label: "Best Finish".to_string(), value: format!("1st (×{})", driver.monaco_wins) }
                StatTile { label: "Pole Pos.".to_string(), value: driver.monaco_poles.to_string() }
                StatTile { label: "Podiums".to_string(), value: driver.monaco_podiums.to_string() }
            }

            div {
                style: "display: flex; justify-content: space-between; font-size: 9px; margin-top: 8px; padding-top: 8px; border-top: 1px solid rgba(0,176,169,0.1);",
                span { style: "color: rgba(255,255,255,0.6);", "Qualifying 2025" }
                span {
                    style: "color: #00E0FF; font-weight: 700;",
                    "P{driver.qualifying_position} • {driver.qualifying_time}"
                }
            }
        }
    }
}
