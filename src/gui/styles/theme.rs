//! テーマとスタイルヘルパー
//! アストンマーティンのティール系ダークテーマ

use crate::engine::TriviaRoundState;
use crate::models::{Sender, TelemetryTab};

/// カラーパレット
pub struct Palette;

impl Palette {
    pub const BACKGROUND: &'static str = "#000000";
    pub const CARD: &'static str = "#0A0A0A";
    pub const INSET: &'static str = "#050505";
    pub const PRIMARY: &'static str = "#00C39A";
    pub const SECONDARY: &'static str = "#00B0A9";
    pub const ACCENT: &'static str = "#00E0FF";
    pub const DANGER: &'static str = "#ef4444";
}

/// CSS クラス名の定数
pub struct CssClasses;

impl CssClasses {
    // アプリケーション
    pub const MAIN_WINDOW: &'static str = "main-window";
    pub const DASHBOARD_GRID: &'static str = "dashboard-grid";
    pub const LEFT_COLUMN: &'static str = "left-column";
    pub const CENTER_COLUMN: &'static str = "center-column";
    pub const RIGHT_COLUMN: &'static str = "right-column";

    // ヘッダー・フッター
    pub const APP_HEADER: &'static str = "app-header";
    pub const APP_TITLE: &'static str = "app-title";
    pub const APP_SUBTITLE: &'static str = "app-subtitle";
    pub const INFO_PILL: &'static str = "info-pill";
    pub const APP_FOOTER: &'static str = "app-footer";

    // カード
    pub const CARD: &'static str = "card";
    pub const CARD_HEADER: &'static str = "card-header";
    pub const CARD_ICON: &'static str = "card-icon";
    pub const CARD_TITLE: &'static str = "card-title";

    // ファンアクティビティ
    pub const FAN_ITEM: &'static str = "fan-item";
    pub const FAN_AVATAR: &'static str = "fan-avatar";
    pub const FAN_POINTS: &'static str = "fan-points";

    // テレメトリ
    pub const TAB_ROW: &'static str = "tab-row";
    pub const TAB: &'static str = "tab";
    pub const TRACK_VISUAL: &'static str = "track-visual";
    pub const STANDING_ROW: &'static str = "standing-row";

    // トリビア・投票
    pub const OPTION_BUTTON: &'static str = "option-button";
    pub const POLL_BAR: &'static str = "poll-bar";
    pub const POLL_BAR_FILL: &'static str = "poll-bar-fill";
    pub const PROGRESS_TRACK: &'static str = "progress-track";
    pub const PROGRESS_FILL: &'static str = "progress-fill";

    // チャット
    pub const CHAT_PANEL: &'static str = "chat-panel";
    pub const MESSAGE_LIST: &'static str = "message-list";
    pub const CHAT_MESSAGE: &'static str = "chat-message";
    pub const TYPING_INDICATOR: &'static str = "typing-indicator";
    pub const CHAT_INPUT: &'static str = "chat-input";
    pub const BTN: &'static str = "btn";
    pub const BTN_PRIMARY: &'static str = "btn-primary";
}

/// 発言者に応じたCSSクラスを取得
pub fn get_message_class(sender: Sender) -> String {
    format!("{} {}", CssClasses::CHAT_MESSAGE, sender.as_str())
}

/// テレメトリタブのCSSクラスを取得
pub fn get_tab_class(tab: TelemetryTab, selected: TelemetryTab) -> String {
    if tab == selected {
        format!("{} active", CssClasses::TAB)
    } else {
        CssClasses::TAB.to_string()
    }
}

/// 順位表の行のCSSクラスを取得
pub fn get_standing_class(highlighted: bool) -> String {
    if highlighted {
        format!("{} highlighted", CssClasses::STANDING_ROW)
    } else {
        CssClasses::STANDING_ROW.to_string()
    }
}

/// トリビア選択肢のCSSクラスを取得
///
/// 結果公開後は正解を `correct`、誤って選んだ選択肢を `incorrect` にする。
pub fn get_trivia_option_class(option: &str, correct_answer: &str, round: &TriviaRoundState) -> String {
    let base_class = CssClasses::OPTION_BUTTON;
    if !round.result_revealed {
        return base_class.to_string();
    }

    let selected = round.selected_option.as_deref() == Some(option);
    let state_class = if option == correct_answer {
        "correct"
    } else if selected {
        "incorrect"
    } else {
        "dimmed"
    };
    format!("{} {}", base_class, state_class)
}

/// ボタンの状態に応じたCSSクラスを取得
pub fn get_button_class(disabled: bool) -> String {
    let mut classes = format!("{} {}", CssClasses::BTN, CssClasses::BTN_PRIMARY);
    if disabled {
        classes.push_str(" disabled");
    }
    classes
}

/// CSSの埋め込み用ヘルパー
pub fn get_embedded_css() -> &'static str {
    include_str!("theme.css")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revealed(selected: &str) -> TriviaRoundState {
        TriviaRoundState {
            question_index: 0,
            selected_option: Some(selected.to_string()),
            result_revealed: true,
        }
    }

    #[test]
    fn test_trivia_option_class_before_reveal() {
        let round = TriviaRoundState {
            question_index: 0,
            selected_option: None,
            result_revealed: false,
        };
        assert_eq!(get_trivia_option_class("14", "14", &round), "option-button");
    }

    #[test]
    fn test_trivia_option_class_after_wrong_answer() {
        let round = revealed("8");
        assert_eq!(get_trivia_option_class("14", "14", &round), "option-button correct");
        assert_eq!(get_trivia_option_class("8", "14", &round), "option-button incorrect");
        assert_eq!(get_trivia_option_class("33", "14", &round), "option-button dimmed");
    }

    #[test]
    fn test_tab_and_message_classes() {
        assert_eq!(
            get_tab_class(TelemetryTab::Speed, TelemetryTab::Speed),
            "tab active"
        );
        assert_eq!(get_tab_class(TelemetryTab::TireWear, TelemetryTab::Speed), "tab");
        assert_eq!(get_message_class(Sender::Bot), "chat-message bot");
        assert_eq!(get_standing_class(true), "standing-row highlighted");
        assert_eq!(get_button_class(true), "btn btn-primary disabled");
    }
}
