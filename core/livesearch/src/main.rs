mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;


use std::collections::BTreeMap;
use std::io::Write;
use std::process;
use std::time::Duration;

use cli::{config_to_command, parse_args, print_completion, resolve_log_file, Config, ParseOutcome};
use common::error::Error;
use common::adapter::StdEnvResolver;
use common::ports::outbound::{now_iso8601, LogLevel, LogRecord};
use domain::command::{DisplayMode, InputMode};
use domain::Command;
use ports::inbound::UseCaseRunner;
use usecase::RunSummary;
use wiring::{build_live_search, open_display, open_input, stdin_is_tty, wire_livesearch, App};

const TITLE: &str = "Real Time Search Bar";

const HELP: &str = r#"Usage: livesearch [options]
Options:
  -h, --help                 Show this help message
  -v, --verbose              Emit pipeline logs to stderr (when no log file is set)
  --lines                    Read one query per line (default when stdin is not a terminal)
  --html                     Print rendered results verbatim, names joined by <br>
  --url <url>                Catalog endpoint. Default: https://api.openbrewerydb.org/breweries
  --debounce-ms <ms>         Quiet period before a query is sent. Default: 500
  --log-file <path>          Append JSONL logs to this file
  --completion <shell>       Generate shell completion script (bash, zsh, fish, ...)

Environment:
  LIVESEARCH_BASE_URL       Catalog endpoint when --url is not given
  LIVESEARCH_DEBOUNCE_MS    Quiet period when --debounce-ms is not given
  LIVESEARCH_LOG_FILE       Log file when --log-file is not given

Description:
  Type to search the catalog by name. A query is sent once typing pauses,
  identical consecutive queries are skipped, and only the newest response is shown.
  Ctrl-C or Ctrl-D quits at once, dropping any query not yet sent.
  Failed lookups are silent; keep typing to retry.

Examples:
  livesearch
  (echo ale; sleep 1; echo ipa) | livesearch --debounce-ms 100
  livesearch --lines --html --url http://localhost:8080/breweries
"#;

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
    stdin_is_tty: bool,
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let cmd = config_to_command(&config, self.app.env_resolver.as_ref(), self.stdin_is_tty)?;
        let command_name = cmd_name_for_log(&cmd);
        let _ = self.app.logger.log(&LogRecord {
            ts: now_iso8601(),
            level: LogLevel::Info,
            message: "command started".to_string(),
            layer: Some("cli".to_string()),
            kind: Some("lifecycle".to_string()),
            fields: {
                let mut m = BTreeMap::new();
                m.insert("command".to_string(), serde_json::json!(command_name));
                Some(m)
            },
        });

        let result = match cmd {
            Command::Help => {
                print_help();
                Ok(0)
            }
            Command::Search {
                catalog_url,
                debounce,
                input,
                display,
            } => self
                .search(&catalog_url, debounce, input, display)
                .map(|summary| {
                    let _ = self.app.logger.log(
                        &LogRecord::new(LogLevel::Info, "search summary")
                            .layer("cli")
                            .kind("lifecycle")
                            .field("summary", summary.to_json()),
                    );
                    0
                }),
        };

        let code = match &result {
            Ok(code) => *code,
            Err(e) => e.exit_code(),
        };
        let _ = self.app.logger.log(&LogRecord {
            ts: now_iso8601(),
            level: LogLevel::Info,
            message: "command finished".to_string(),
            layer: Some("cli".to_string()),
            kind: Some("lifecycle".to_string()),
            fields: {
                let mut m = BTreeMap::new();
                m.insert("command".to_string(), serde_json::json!(command_name));
                m.insert("exit_code".to_string(), serde_json::json!(code));
                Some(m)
            },
        });
        if let Err(ref e) = result {
            let _ = self.app.logger.log(&LogRecord {
                ts: now_iso8601(),
                level: LogLevel::Error,
                message: e.to_string(),
                layer: Some("cli".to_string()),
                kind: Some("error".to_string()),
                fields: None,
            });
        }
        result
    }
}

impl Runner {
    fn search(
        &self,
        catalog_url: &str,
        debounce: Duration,
        input: InputMode,
        display: DisplayMode,
    ) -> Result<RunSummary, Error> {
        let live_search = build_live_search(&self.app, catalog_url, debounce)?;
        let mut source = open_input(input)?;
        let sink = open_display(display);

        if display == DisplayMode::Terminal {
            // 画面を消してタイトルを出し、2 行目をプロンプトにする
            let mut out = std::io::stdout();
            let _ = write!(out, "\x1b[2J\x1b[H{}\r\n", TITLE);
            let _ = out.flush();
        }
        let summary = live_search.run(source.as_mut(), sink);
        if display == DisplayMode::Terminal {
            let mut out = std::io::stdout();
            let _ = write!(out, "\r\x1b[J\n");
            let _ = out.flush();
        }
        summary
    }
}

fn cmd_name_for_log(cmd: &Command) -> &'static str {
    match cmd {
        Command::Help => "help",
        Command::Search { .. } => "search",
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("livesearch: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    let log_file = resolve_log_file(&config, &StdEnvResolver);
    let app = wire_livesearch(log_file, config.verbose);
    let runner = Runner {
        app,
        stdin_is_tty: stdin_is_tty(),
    };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: livesearch [options]");
}

fn print_help() {
    print!("{}", HELP);
}
