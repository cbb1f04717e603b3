use crate::domain::command::{DisplayMode, InputMode};
use crate::domain::Command;
use crate::usecase::DEFAULT_DEBOUNCE_MS;
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::error::Error;
use common::ports::outbound::EnvResolver;
use std::path::PathBuf;
use std::time::Duration;

/// カタログ API の既定のベース URL
pub const DEFAULT_CATALOG_URL: &str = "https://api.openbrewerydb.org/breweries";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub help: bool,
    /// -v / --verbose: ログファイル未指定時に構造化ログを stderr に出す
    pub verbose: bool,
    /// --lines: TTY でも 1 行 = 入力欄の全文として読む
    pub lines: bool,
    /// --html: 描画結果を `<br>` 区切りのまま stdout に出す
    pub html: bool,
    pub url: Option<String>,
    pub debounce_ms: Option<u64>,
    pub log_file: Option<PathBuf>,
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("livesearch")
        .about("Search the brewery catalog as you type")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Emit pipeline logs to stderr (when no log file is set)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("lines")
                .long("lines")
                .help("Read one query per line instead of raw keystrokes")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("html")
                .long("html")
                .help("Print rendered results verbatim (names joined by <br>)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("url")
                .long("url")
                .value_name("url")
                .help("Catalog endpoint (default: LIVESEARCH_BASE_URL or the Open Brewery DB)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("debounce-ms")
                .long("debounce-ms")
                .value_name("ms")
                .help("Quiet period before a query is sent (default: 500)")
                .value_parser(value_parser!(u64))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("log-file")
                .long("log-file")
                .value_name("path")
                .help("Append JSONL logs to this file")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("completion")
                .long("completion")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    Config {
        help: matches.get_flag("help"),
        verbose: matches.get_flag("verbose"),
        lines: matches.get_flag("lines"),
        html: matches.get_flag("html"),
        url: matches.get_one::<String>("url").cloned(),
        debounce_ms: matches.get_one::<u64>("debounce-ms").copied(),
        log_file: matches.get_one::<PathBuf>("log-file").cloned(),
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("completion") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }
    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// テスト用: 引数スライスから解析する
#[cfg(test)]
pub fn parse_args_from(args: &[&str]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "livesearch", &mut std::io::stdout());
}

/// Config を Command に変換する。CLI 引数 → 環境変数 → 既定値の順に解決する。
pub fn config_to_command(
    config: &Config,
    env: &dyn EnvResolver,
    stdin_is_tty: bool,
) -> Result<Command, Error> {
    if config.help {
        return Ok(Command::Help);
    }

    let catalog_url = config
        .url
        .clone()
        .or_else(|| env.catalog_url())
        .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());

    let debounce_ms = match config.debounce_ms {
        Some(ms) => ms,
        None => match env.debounce_ms() {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::invalid_argument(format!(
                    "LIVESEARCH_DEBOUNCE_MS must be a non-negative integer, got '{}'",
                    raw
                ))
            })?,
            None => DEFAULT_DEBOUNCE_MS,
        },
    };

    let input = if config.lines || !stdin_is_tty {
        InputMode::Lines
    } else {
        InputMode::Keystroke
    };
    let display = match (config.html, input) {
        (true, _) => DisplayMode::Html,
        (false, InputMode::Keystroke) => DisplayMode::Terminal,
        (false, InputMode::Lines) => DisplayMode::Text,
    };

    Ok(Command::Search {
        catalog_url,
        debounce: Duration::from_millis(debounce_ms),
        input,
        display,
    })
}

/// ログの出力先（CLI 引数 → 環境変数）
pub fn resolve_log_file(config: &Config, env: &dyn EnvResolver) -> Option<PathBuf> {
    config.log_file.clone().or_else(|| env.log_file_path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeEnv {
        url: Option<String>,
        debounce: Option<String>,
        log_file: Option<PathBuf>,
    }

    impl EnvResolver for FakeEnv {
        fn catalog_url(&self) -> Option<String> {
            self.url.clone()
        }
        fn debounce_ms(&self) -> Option<String> {
            self.debounce.clone()
        }
        fn log_file_path(&self) -> Option<PathBuf> {
            self.log_file.clone()
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(!config.help);
        assert!(!config.verbose);
        assert!(!config.lines);
        assert!(config.url.is_none());
        assert!(config.debounce_ms.is_none());
    }

    #[test]
    fn test_parse_all_flags() {
        let config = parse_args_from(&[
            "livesearch",
            "-v",
            "--lines",
            "--html",
            "--url",
            "http://localhost:8080/breweries",
            "--debounce-ms",
            "250",
            "--log-file",
            "/tmp/ls.jsonl",
        ])
        .unwrap();
        assert!(config.verbose);
        assert!(config.lines);
        assert!(config.html);
        assert_eq!(config.url.as_deref(), Some("http://localhost:8080/breweries"));
        assert_eq!(config.debounce_ms, Some(250));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/ls.jsonl")));
    }

    #[test]
    fn test_parse_rejects_bad_debounce() {
        let err = parse_args_from(&["livesearch", "--debounce-ms", "soon"]).unwrap_err();
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn test_parse_rejects_unknown_flag() {
        let err = parse_args_from(&["livesearch", "--nope"]).unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_help_command() {
        let config = parse_args_from(&["livesearch", "-h"]).unwrap();
        let cmd = config_to_command(&config, &FakeEnv::default(), true).unwrap();
        assert_eq!(cmd, Command::Help);
    }

    #[test]
    fn test_defaults_on_tty() {
        let cmd = config_to_command(&Config::default(), &FakeEnv::default(), true).unwrap();
        assert_eq!(
            cmd,
            Command::Search {
                catalog_url: DEFAULT_CATALOG_URL.to_string(),
                debounce: Duration::from_millis(500),
                input: InputMode::Keystroke,
                display: DisplayMode::Terminal,
            }
        );
    }

    #[test]
    fn test_piped_stdin_uses_lines_and_text() {
        let cmd = config_to_command(&Config::default(), &FakeEnv::default(), false).unwrap();
        match cmd {
            Command::Search { input, display, .. } => {
                assert_eq!(input, InputMode::Lines);
                assert_eq!(display, DisplayMode::Text);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_env_fallback_and_flag_precedence() {
        let env = FakeEnv {
            url: Some("http://env.example/breweries".to_string()),
            debounce: Some("120".to_string()),
            log_file: Some(PathBuf::from("/var/log/ls.jsonl")),
        };
        let cmd = config_to_command(&Config::default(), &env, false).unwrap();
        match cmd {
            Command::Search {
                catalog_url,
                debounce,
                ..
            } => {
                assert_eq!(catalog_url, "http://env.example/breweries");
                assert_eq!(debounce, Duration::from_millis(120));
            }
            other => panic!("unexpected {:?}", other),
        }

        let config = Config {
            url: Some("http://flag.example/b".to_string()),
            debounce_ms: Some(0),
            html: true,
            ..Default::default()
        };
        match config_to_command(&config, &env, true).unwrap() {
            Command::Search {
                catalog_url,
                debounce,
                display,
                ..
            } => {
                assert_eq!(catalog_url, "http://flag.example/b");
                assert_eq!(debounce, Duration::ZERO);
                assert_eq!(display, DisplayMode::Html);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            resolve_log_file(&Config::default(), &env),
            Some(PathBuf::from("/var/log/ls.jsonl"))
        );
    }

    #[test]
    fn test_bad_env_debounce_is_invalid_argument() {
        let env = FakeEnv {
            debounce: Some("fast".to_string()),
            ..Default::default()
        };
        let err = config_to_command(&Config::default(), &env, true).unwrap_err();
        assert_eq!(err.exit_code(), 64);
        assert!(err.to_string().contains("LIVESEARCH_DEBOUNCE_MS"));
    }
}
