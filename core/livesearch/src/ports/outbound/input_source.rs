//! 入力欄 Outbound ポート
//!
//! 入力欄の変更通知を購読する。購読は Subscription として明示的に解除でき、
//! 解除（または drop）後はリスナーが呼ばれない。端末状態などの資源も解除時に戻す。

use crate::domain::RawInputEvent;
use common::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 入力元からの通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputNotice {
    /// 入力欄の内容が変わった
    Changed(RawInputEvent),
    /// 入力が尽きた（パイプの EOF）。保留中の検索語は確定させてから終える
    Closed,
    /// 利用者が入力欄を抜けた（Ctrl-C / Ctrl-D）。保留中の検索語も取得中の結果も捨てる
    Aborted,
}

/// 通知を受け取るリスナー。入力元のスレッドから呼ばれる。
pub type InputListener = Box<dyn FnMut(InputNotice) + Send>;

/// 入力欄
pub trait InputSource {
    /// 変更通知の購読を開始する。入力欄に接続できない場合は Err（致命的なセットアップ失敗）。
    fn subscribe(&mut self, listener: InputListener) -> Result<Subscription, Error>;
}

/// 購読ハンドル
pub struct Subscription {
    active: Arc<AtomicBool>,
    resource: Option<Box<dyn Send>>,
}

impl Subscription {
    /// `active` は入力元のスレッドと共有するフラグ。false になったら配信を止めること。
    pub fn new(active: Arc<AtomicBool>) -> Self {
        Self {
            active,
            resource: None,
        }
    }

    /// 解除時に drop する資源（raw モードの復元ガード等）を持たせる
    pub fn with_resource(mut self, resource: impl Send + 'static) -> Self {
        self.resource = Some(Box::new(resource));
        self
    }

    /// 購読を解除する
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        self.active.store(false, Ordering::SeqCst);
        self.resource.take();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct DropFlag(Arc<Mutex<bool>>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            *self.0.lock().unwrap() = true;
        }
    }

    #[test]
    fn test_unsubscribe_clears_flag_and_releases_resource() {
        let active = Arc::new(AtomicBool::new(true));
        let dropped = Arc::new(Mutex::new(false));
        let sub = Subscription::new(Arc::clone(&active))
            .with_resource(DropFlag(Arc::clone(&dropped)));
        assert!(active.load(Ordering::SeqCst));

        sub.unsubscribe();
        assert!(!active.load(Ordering::SeqCst));
        assert!(*dropped.lock().unwrap());
    }

    #[test]
    fn test_drop_also_unsubscribes() {
        let active = Arc::new(AtomicBool::new(true));
        {
            let _sub = Subscription::new(Arc::clone(&active));
        }
        assert!(!active.load(Ordering::SeqCst));
    }
}
