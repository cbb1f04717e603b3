//! CLI 引数の解析と Command への変換

pub mod args;

pub use args::{
    config_to_command, parse_args, print_completion, resolve_log_file, Config, ParseOutcome,
};
