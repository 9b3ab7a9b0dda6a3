//! Artificial network delay for exercising loading states.

use async_trait::async_trait;
use learnsphere_core::prelude::*;
use std::time::Duration;

use crate::repository::DocumentRepository;

/// Wraps a repository and sleeps before every operation.
///
/// Delays come from [`LatencyConfig`]; a disabled config makes this a
/// transparent pass-through.
pub struct SimulatedLatency<R> {
    inner: R,
    latency: LatencyConfig,
}

impl<R> SimulatedLatency<R> {
    pub fn new(inner: R, latency: LatencyConfig) -> Self {
        Self { inner, latency }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    async fn pause(delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl<R: DocumentRepository> DocumentRepository for SimulatedLatency<R> {
    async fn fetch_all(&self) -> Result<Vec<Document>> {
        Self::pause(self.latency.list()).await;
        self.inner.fetch_all().await
    }

    async fn fetch(&self, id: &str) -> Result<Document> {
        Self::pause(self.latency.read()).await;
        self.inner.fetch(id).await
    }

    async fn create(&self, data: CreateDocument, editor: &str) -> Result<Document> {
        Self::pause(self.latency.write()).await;
        self.inner.create(data, editor).await
    }

    async fn update(&self, id: &str, data: UpdateDocument, editor: &str) -> Result<Document> {
        Self::pause(self.latency.write()).await;
        self.inner.update(id, data, editor).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        Self::pause(self.latency.delete()).await;
        self.inner.delete(id).await
    }

    async fn search(&self, query: &str) -> Result<Vec<Document>> {
        Self::pause(self.latency.read()).await;
        self.inner.search(query).await
    }
}
