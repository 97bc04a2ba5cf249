//! Driver acquisition strategy trait

use async_trait::async_trait;

use crate::session::{Session, SessionConfig};
use crate::Result;

/// One way of obtaining a live browser session
///
/// Strategies are tried in order by the provider; the first one that returns
/// a session wins.
#[async_trait]
pub trait AcquireStrategy: Send + Sync {
    /// Short name used in logs and failure reports (e.g. "system-path")
    fn name(&self) -> &str;

    /// Try to produce a configured session
    async fn try_acquire(&self, config: &SessionConfig) -> Result<Session>;
}
