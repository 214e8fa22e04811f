//! エンジン間の接続点

/// ボット発言の注入先
///
/// トリビア・投票エンジンはこのトレイト越しにチャットへ発言を送る。
/// 実装側は受け取った文言を自身の遅延後にトランスクリプトへ追加する。
pub trait BotMessageSink: Send + Sync {
    fn receive_bot_message(&self, text: String);
}
