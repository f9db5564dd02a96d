use std::sync::Arc;

use tokio::sync::watch;

use crate::models::SessionToken;

/// Overwrite cell holding the latest session token.
///
/// Writers replace the value wholesale and readers only ever see the most
/// recent write; there is no ordering between writers beyond that.
#[derive(Clone, Debug)]
pub struct SessionTokenCell {
    tx: Arc<watch::Sender<Option<SessionToken>>>,
}

impl SessionTokenCell {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    pub fn publish(&self, token: SessionToken) {
        self.tx.send_replace(Some(token));
    }

    pub fn current(&self) -> Option<SessionToken> {
        self.tx.borrow().clone()
    }

    /// A receiver notified on every publish.
    pub fn subscribe(&self) -> watch::Receiver<Option<SessionToken>> {
        self.tx.subscribe()
    }
}

impl Default for SessionTokenCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn last_write_wins_and_notifies() {
        let cell = SessionTokenCell::new();
        assert!(cell.current().is_none());

        let mut rx = cell.subscribe();
        let writer = cell.clone();
        writer.publish(SessionToken::new("one"));
        writer.publish(SessionToken::new("two"));

        rx.changed().await.expect("sender alive");
        assert_eq!(rx.borrow().as_ref().map(|t| t.as_str()), Some("two"));
        assert_eq!(cell.current().map(|t| t.as_str().to_string()), Some("two".into()));
    }
}
