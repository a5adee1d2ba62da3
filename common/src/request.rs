//! リクエストの世代管理
//!
//! 検索・更新などの操作ごとに単調増加のトークンを発行し、
//! 最新でないトークンのレスポンスは捨てる。

/// 発行済みトークン
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_token_wins() {
        let mut tracker = RequestTracker::new();
        let first = tracker.issue();
        let second = tracker.issue();

        assert!(!tracker.is_latest(first));
        assert!(tracker.is_latest(second));
        assert!(first < second);
    }
}
