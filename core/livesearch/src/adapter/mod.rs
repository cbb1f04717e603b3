//! Adapter 層: 入力欄・表示領域ポートの標準実装

pub mod display;
pub mod keystroke_input;
pub mod line_input;
#[cfg(unix)]
pub mod terminal;

pub use display::{PlainDisplay, TerminalDisplay};
#[cfg(unix)]
pub use keystroke_input::KeystrokeInputSource;
pub use line_input::LineInputSource;
