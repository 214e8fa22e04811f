use dioxus::prelude::*;

use crate::data::{StaticTables, MONACO_TRACK_PATH};
use crate::gui::{
    components::Card,
    styles::theme::{get_standing_class, get_tab_class, CssClasses, Palette},
};
use crate::models::{TelemetrySample, TelemetryTab};

/// モナコGPテレメトリカード
///
/// 折りたたみ可能（初期状態は展開）。タブで表示する系列を切り替える。
#[component]
pub fn TelemetryCard() -> Element {
    let tables = use_context::<StaticTables>();
    let mut is_expanded = use_signal(|| true);
    let mut selected_tab = use_signal(TelemetryTab::default);

    let arrow = if is_expanded() { "▲" } else { "▼" };

    rsx! {
        Card {
            title: "Monaco GP Telemetry".to_string(),
            icon: "📊".to_string(),

            button {
                class: CssClasses::TAB,
                style: "width: 100%; margin-bottom: 12px;",
                onclick: move |_| {
                    let expanded = !is_expanded();
                    tracing::debug!("📊 Telemetry card expanded: {}", expanded);
                    is_expanded.set(expanded);
                },
                "{arrow}"
            }

            if is_expanded() {
                div {
                    class: CssClasses::TAB_ROW,
                    for tab in TelemetryTab::ALL {
                        button {
                            key: "{tab:?}",
                            class: get_tab_class(tab, selected_tab()),
                            onclick: move |_| selected_tab.set(tab),
                            {tab.label()}
                        }
                    }
                }

                TelemetrySeries { tab: selected_tab(), samples: tables.telemetry.clone() }
                MonacoTrackVisual {}
                TeamStandings {}
            }
        }
    }
}

/// 選択中タブの系列を横棒で表示
#[component]
fn TelemetrySeries(tab: TelemetryTab, samples: Vec<TelemetrySample>) -> Element {
    let series = tab.series(&samples);
    let max = series
        .iter()
        .map(|(_, value)| value.abs())
        .fold(0.0_f64, f64::max);
    let rows: Vec<(String, f64, String)> = series
        .into_iter()
        .map(|(time, value)| {
            let label = format!("{} {}", value, tab.unit());
            (time, bar_width(value, max), label)
        })
        .collect();
    let accent = Palette::ACCENT;

    rsx! {
        div {
            style: "margin-bottom: 12px; font-size: 10px;",
            for (time, width, label) in rows {
                div {
                    key: "{time}",
                    style: "display: flex; align-items: center; gap: 6px; margin-bottom: 3px;",
                    span { style: "width: 28px; color: rgba(255,255,255,0.6);", "{time}" }
                    div {
                        class: CssClasses::PROGRESS_TRACK,
                        style: "flex: 1;",
                        div {
                            class: CssClasses::PROGRESS_FILL,
                            style: "width: {width}%;",
                        }
                    }
                    span {
                        style: "width: 64px; text-align: right; color: {accent};",
                        "{label}"
                    }
                }
            }
        }
    }
}

fn bar_width(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    (value.abs() / max * 100.0).round()
}

/// モナコのコース図とライブ情報
#[component]
fn MonacoTrackVisual() -> Element {
    let tables = use_context::<StaticTables>();
    let monaco = tables.monaco.clone();
    let primary = Palette::PRIMARY;

    rsx! {
        div {
            class: CssClasses::TRACK_VISUAL,

            span {
                style: "position: absolute; top: 6px; left: 8px; font-size: 10px; font-weight: 700; color: {primary};",
                "CIRCUIT DE MONACO - LIVE"
            }

            svg {
                view_box: "0 0 200 100",
                width: "100%",
                height: "100%",
                path {
                    d: MONACO_TRACK_PATH,
                    fill: "none",
                    stroke: Palette::SECONDARY,
                    stroke_width: "1",
                    opacity: "0.3",
                }
                path {
                    d: MONACO_TRACK_PATH,
                    fill: "none",
                    stroke: Palette::ACCENT,
                    stroke_width: "2",
                }
                circle { cx: "47", cy: "45", r: "2", fill: Palette::PRIMARY, opacity: "0.5" }
                circle { cx: "140", cy: "28", r: "2", fill: Palette::PRIMARY, opacity: "0.5" }
                circle { cx: "157", cy: "60", r: "2", fill: Palette::PRIMARY, opacity: "0.5" }
                text { x: "47", y: "38", font_size: "6", fill: Palette::SECONDARY, "Ste Devote" }
                text { x: "132", y: "24", font_size: "6", fill: Palette::SECONDARY, "Casino" }
                text { x: "147", y: "84", font_size: "6", fill: Palette::SECONDARY, "Rascasse" }
            }

            div {
                style: "position: absolute; bottom: 6px; left: 8px; right: 8px; display: flex; justify-content: space-between; font-size: 8px;",
                span { "Lap: {monaco.current_lap}/{monaco.total_laps}" }
                span { "P{monaco.driver.position} • Gap: {monaco.driver.gap}" }
                span { "{monaco.air_temperature}°C Air • {monaco.track_temperature}°C Track" }
            }
        }
    }
}

/// コンストラクターズランキング
#[component]
fn TeamStandings() -> Element {
    let tables = use_context::<StaticTables>();
    let primary = Palette::PRIMARY;

    rsx! {
        div {
            style: "margin-top: 12px;",
            div {
                style: "font-size: 10px; font-weight: 600; margin-bottom: 8px; color: {primary};",
                "Constructor Standings"
            }
            for standing in tables.standings.iter() {
                div {
                    key: "{standing.team}",
                    class: get_standing_class(standing.highlighted),
                    span { "{standing.position}. {standing.team}" }
                    span { "{standing.points} pts" }
                }
            }
        }
    }
}
