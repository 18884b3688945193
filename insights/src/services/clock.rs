//! Production clock backed by the tokio timer

use std::sync::Arc;
use std::time::Duration;

use crate::traits::Clock;

/// Real clock: sleeps on the tokio runtime
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait::async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

#[async_trait::async_trait]
impl<C: Clock + ?Sized> Clock for Arc<C> {
    async fn sleep(&self, delay: Duration) {
        (**self).sleep(delay).await;
    }
}
