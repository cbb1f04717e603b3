//! ライブ検索のイベントループ
//!
//! 入力通知・入力終了・取得結果はすべて 1 本の mpsc チャネルに集まり、
//! パイプラインの状態はこのループのスレッドだけが触る（ロック不要）。
//! 待ち時間は debounce の締め切りまでの recv_timeout で表す。
//!
//! 状態: IDLE → DEBOUNCING → FETCHING → IDLE（描画済み）。
//! 入力が尽きた（Closed）後も、保留中の debounce が確定し最新の取得が決着するまで回り続ける。
//! 利用者が抜けた（Aborted）ときは保留中の値も取得中の結果も捨て、すぐに戻る。

use crate::domain::extract_query;
use crate::ports::outbound::{DisplaySink, InputNotice, InputSource};
use crate::usecase::{Debouncer, Deduplicator, FetchOutcome, LatestFetcher, Renderer, Settled};
use common::error::Error;
use common::ports::outbound::{CatalogClient, Clock, Log, LogLevel, LogRecord};
use serde_json::{json, Value};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

/// debounce の既定の静止時間
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// イベントループに届くメッセージ
#[derive(Debug)]
pub enum PipelineMsg {
    Input(InputNotice),
    Fetched(FetchOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    pub debounce: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

/// 1 回の実行で数えた件数（終了時にログへ出す）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// 受け取った入力通知
    pub inputs: usize,
    /// debounce を抜けた値
    pub debounced: usize,
    /// 重複として捨てた値
    pub duplicates: usize,
    /// 開始した取得
    pub fetches: usize,
    /// 新しい取得に追い越されて捨てた結果
    pub stale: usize,
    /// 失敗した取得（握りつぶしたもの）
    pub failures: usize,
    /// 表示領域を書き換えた回数
    pub renders: usize,
}

impl RunSummary {
    pub fn to_json(&self) -> Value {
        json!({
            "inputs": self.inputs,
            "debounced": self.debounced,
            "duplicates": self.duplicates,
            "fetches": self.fetches,
            "stale": self.stale,
            "failures": self.failures,
            "renders": self.renders,
        })
    }
}

/// ライブ検索 UseCase
pub struct LiveSearchUseCase {
    client: Arc<dyn CatalogClient>,
    clock: Arc<dyn Clock>,
    logger: Arc<dyn Log>,
    settings: PipelineSettings,
}

/// 1 回の run の間だけ生きるパイプライン状態
struct Pipeline {
    debouncer: Debouncer,
    dedupe: Deduplicator,
    fetcher: LatestFetcher<PipelineMsg>,
    renderer: Renderer,
    summary: RunSummary,
    input_closed: bool,
}

impl Pipeline {
    fn finished(&self) -> bool {
        self.input_closed && self.debouncer.is_idle() && !self.fetcher.in_flight()
    }
}

impl LiveSearchUseCase {
    pub fn new(
        client: Arc<dyn CatalogClient>,
        clock: Arc<dyn Clock>,
        logger: Arc<dyn Log>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            client,
            clock,
            logger,
            settings,
        }
    }

    #[cfg(test)]
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// 入力元を購読し、入力が閉じて後始末が終わるまでパイプラインを回す。
    ///
    /// 購読できない場合だけ Err。取得や表示の失敗はログに残して続行する。
    pub fn run(
        &self,
        source: &mut dyn InputSource,
        display: Box<dyn DisplaySink>,
    ) -> Result<RunSummary, Error> {
        let (tx, rx) = mpsc::channel::<PipelineMsg>();
        let input_tx = tx.clone();
        let subscription = source.subscribe(Box::new(move |notice| {
            let _ = input_tx.send(PipelineMsg::Input(notice));
        }))?;

        let mut p = Pipeline {
            debouncer: Debouncer::new(self.settings.debounce),
            dedupe: Deduplicator::new(),
            fetcher: LatestFetcher::new(Arc::clone(&self.client), tx, PipelineMsg::Fetched),
            renderer: Renderer::new(display),
            summary: RunSummary::default(),
            input_closed: false,
        };
        self.log(
            LogLevel::Info,
            "pipeline started",
            "lifecycle",
            vec![("debounce_ms", json!(self.settings.debounce.as_millis() as u64))],
        );

        while !p.finished() {
            let msg = match p.debouncer.deadline() {
                Some(deadline) => {
                    let wait = deadline.saturating_sub(self.clock.now_ms());
                    match rx.recv_timeout(Duration::from_millis(wait)) {
                        Ok(msg) => Some(msg),
                        Err(RecvTimeoutError::Timeout) => None,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                None => match rx.recv() {
                    Ok(msg) => Some(msg),
                    Err(_) => break,
                },
            };

            if let Some(PipelineMsg::Input(InputNotice::Aborted)) = msg {
                self.abort(&mut p);
                break;
            }
            // 受信までに締め切りを過ぎていた値を先に確定させる
            self.advance_timer(&mut p);
            match msg {
                Some(PipelineMsg::Input(InputNotice::Changed(event))) => {
                    p.summary.inputs += 1;
                    let query = extract_query(&event);
                    self.log(
                        LogLevel::Debug,
                        "input changed",
                        "input",
                        vec![("seq", json!(event.seq())), ("query", json!(query.as_str()))],
                    );
                    p.debouncer.push(query, self.clock.now_ms());
                }
                Some(PipelineMsg::Input(InputNotice::Closed)) => {
                    p.input_closed = true;
                    self.log(LogLevel::Debug, "input closed", "input", vec![]);
                }
                Some(PipelineMsg::Fetched(outcome)) => self.on_fetched(&mut p, outcome),
                Some(PipelineMsg::Input(InputNotice::Aborted)) | None => {}
            }
            self.advance_timer(&mut p);
        }

        subscription.unsubscribe();
        self.log(
            LogLevel::Info,
            "pipeline finished",
            "lifecycle",
            vec![("summary", p.summary.to_json())],
        );
        Ok(p.summary)
    }

    /// 保留中の値を捨て、取得中の世代を見捨てる
    fn abort(&self, p: &mut Pipeline) {
        p.input_closed = true;
        let dropped = p.debouncer.cancel();
        let abandoned = p.fetcher.abandon();
        self.log(
            LogLevel::Debug,
            "input aborted",
            "input",
            vec![
                ("dropped_query", json!(dropped.as_ref().map(|q| q.as_str()))),
                ("abandoned_fetch", json!(abandoned)),
            ],
        );
    }

    /// 締め切りを過ぎた値を重複抑止へ渡し、通ったものを取得する
    fn advance_timer(&self, p: &mut Pipeline) {
        let Some(stable) = p.debouncer.poll(self.clock.now_ms()) else {
            return;
        };
        p.summary.debounced += 1;
        let Some(query) = p.dedupe.admit(stable) else {
            p.summary.duplicates += 1;
            self.log(LogLevel::Debug, "duplicate query dropped", "debounce", vec![]);
            return;
        };
        match p.fetcher.start(query.clone()) {
            Ok(generation) => {
                p.summary.fetches += 1;
                self.log(
                    LogLevel::Debug,
                    "fetch started",
                    "fetch",
                    vec![("generation", json!(generation)), ("query", json!(query.as_str()))],
                );
            }
            Err(e) => {
                p.summary.failures += 1;
                self.log(
                    LogLevel::Warn,
                    "fetch failed",
                    "fetch",
                    vec![("query", json!(query.as_str())), ("error", json!(e.to_string()))],
                );
            }
        }
    }

    fn on_fetched(&self, p: &mut Pipeline, outcome: FetchOutcome) {
        match p.fetcher.settle(outcome) {
            Settled::Deliver { query, results } => match p.renderer.show(&results) {
                Ok(_) => {
                    p.summary.renders += 1;
                    self.log(
                        LogLevel::Debug,
                        "rendered",
                        "render",
                        vec![("query", json!(query.as_str())), ("count", json!(results.len()))],
                    );
                }
                Err(e) => self.log(
                    LogLevel::Warn,
                    "display write failed",
                    "render",
                    vec![("error", json!(e.to_string()))],
                ),
            },
            Settled::Failed { query, error } => {
                p.summary.failures += 1;
                self.log(
                    LogLevel::Warn,
                    "fetch failed",
                    "fetch",
                    vec![("query", json!(query.as_str())), ("error", json!(error.to_string()))],
                );
            }
            Settled::Stale { generation, query } => {
                p.summary.stale += 1;
                self.log(
                    LogLevel::Debug,
                    "stale result discarded",
                    "fetch",
                    vec![("generation", json!(generation)), ("query", json!(query.as_str()))],
                );
            }
        }
    }

    fn log(&self, level: LogLevel, message: &str, kind: &str, fields: Vec<(&str, Value)>) {
        let mut rec = LogRecord::new(level, message).layer("usecase").kind(kind);
        for (k, v) in fields {
            rec = rec.field(k, v);
        }
        let _ = self.logger.log(&rec);
    }
}
