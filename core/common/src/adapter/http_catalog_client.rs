//! HTTP カタログクライアント（reqwest blocking）
//!
//! `GET <base>?by_name=<urlencoded query>` を 1 回送り、JSON 配列をレコード列に変換する。
//! タイムアウトは reqwest の既定値に任せる。

use crate::domain::{Record, ResultSet};
use crate::error::Error;
use crate::ports::outbound::CatalogClient;
use reqwest::Url;

/// エラーメッセージに含める本文の最大文字数
const BODY_SNIPPET_MAX: usize = 200;

/// ベース URL を検証する（http / https の絶対 URL のみ）
pub fn parse_base_url(raw: &str) -> Result<Url, Error> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::invalid_argument(format!("Invalid catalog URL '{}': {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::invalid_argument(format!(
            "Invalid catalog URL '{}': unsupported scheme '{}'",
            raw, other
        ))),
    }
}

/// 検索 URL を組み立てる。既存のクエリパラメータは残し、`by_name` を追加する。
pub fn build_search_url(base: &Url, query: &str) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut().append_pair("by_name", query);
    url
}

/// レスポンス本文（JSON 配列）を ResultSet に変換する
pub fn parse_result_set(body: &str) -> Result<ResultSet, Error> {
    serde_json::from_str::<Vec<Record>>(body)
        .map(ResultSet::new)
        .map_err(|e| Error::json(format!("Failed to parse catalog response: {}", e)))
}

fn snippet(body: &str) -> String {
    if body.chars().count() <= BODY_SNIPPET_MAX {
        return body.to_string();
    }
    let head: String = body.chars().take(BODY_SNIPPET_MAX).collect();
    format!("{}...", head)
}

/// reqwest blocking を使う CatalogClient 実装
pub struct HttpCatalogClient {
    base_url: Url,
    client: reqwest::blocking::Client,
}

impl HttpCatalogClient {
    /// ベース URL を検証してクライアントを作る
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| Error::setup(format!("Failed to build HTTP client: {}", e)))?;
        Self::with_client(base_url, client)
    }

    /// 事前に構成した reqwest クライアントを使う（プロキシ無効化などのテスト用）
    pub fn with_client(base_url: &str, client: reqwest::blocking::Client) -> Result<Self, Error> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl CatalogClient for HttpCatalogClient {
    fn search(&self, query: &str) -> Result<ResultSet, Error> {
        let url = build_search_url(&self.base_url, query);
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::http(format!("HTTP {}: {}", status, snippet(&body))));
        }

        parse_result_set(&body)
    }
}
