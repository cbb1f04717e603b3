//! LatestFetcher: 最新の検索語だけを取得する（switch-to-latest）
//!
//! 取得ごとに単調増加する世代番号を振り、ワーカースレッドで CatalogClient を呼ぶ。
//! 結果はチャネルでイベントループへ戻り、`settle` が最新世代以外を Stale として捨てる。
//! 古いリクエストの HTTP 自体は止めないが、その結果が描画に届くことはない。

use crate::domain::QueryString;
use common::domain::ResultSet;
use common::error::Error;
use common::ports::outbound::CatalogClient;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

/// ワーカースレッドから戻る 1 回分の取得結果
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub generation: u64,
    pub query: QueryString,
    pub result: Result<ResultSet, Error>,
}

/// `settle` の判定
#[derive(Debug, Clone, PartialEq)]
pub enum Settled {
    /// 最新世代の成功。描画する
    Deliver { query: QueryString, results: ResultSet },
    /// 最新世代の失敗。握りつぶす（再試行しない）
    Failed { query: QueryString, error: Error },
    /// 新しい取得が始まった後に届いた古い結果。無視する
    Stale { generation: u64, query: QueryString },
}

/// 最新の取得だけを有効とする取得器
///
/// `M` はイベントループのメッセージ型。`wrap` で FetchOutcome を包んで送る。
pub struct LatestFetcher<M: Send + 'static> {
    client: Arc<dyn CatalogClient>,
    tx: Sender<M>,
    wrap: fn(FetchOutcome) -> M,
    generation: u64,
    in_flight: bool,
}

impl<M: Send + 'static> LatestFetcher<M> {
    pub fn new(client: Arc<dyn CatalogClient>, tx: Sender<M>, wrap: fn(FetchOutcome) -> M) -> Self {
        Self {
            client,
            tx,
            wrap,
            generation: 0,
            in_flight: false,
        }
    }

    /// 新しい取得を始める。それ以前の取得はこの時点で Stale 扱いになる。
    pub fn start(&mut self, query: QueryString) -> Result<u64, Error> {
        self.generation += 1;
        self.in_flight = false;
        let generation = self.generation;

        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let wrap = self.wrap;
        thread::Builder::new()
            .name(format!("livesearch-fetch-{}", generation))
            .spawn(move || {
                let result = client.search(query.as_str());
                // ループ終了後に届いた結果は捨てる
                let _ = tx.send(wrap(FetchOutcome {
                    generation,
                    query,
                    result,
                }));
            })
            .map_err(|e| Error::system(format!("Failed to spawn fetch worker: {}", e)))?;

        self.in_flight = true;
        Ok(generation)
    }

    /// 届いた結果を判定する
    pub fn settle(&mut self, outcome: FetchOutcome) -> Settled {
        if outcome.generation != self.generation || !self.in_flight {
            return Settled::Stale {
                generation: outcome.generation,
                query: outcome.query,
            };
        }
        self.in_flight = false;
        match outcome.result {
            Ok(results) => Settled::Deliver {
                query: outcome.query,
                results,
            },
            Err(error) => Settled::Failed {
                query: outcome.query,
                error,
            },
        }
    }

    /// 最新世代の結果がまだ届いていないか
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// 最新世代を待たずに見捨てる。以後届く結果はすべて Stale。
    /// 取得中だった場合は true。
    pub fn abandon(&mut self) -> bool {
        std::mem::replace(&mut self.in_flight, false)
    }
}
