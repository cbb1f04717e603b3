//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（CLI）がアプリを呼び出すインターフェース
//! - outbound: アプリが外界（入力欄・表示領域）を使うための trait

pub mod inbound;
pub mod outbound;
