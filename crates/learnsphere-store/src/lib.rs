//! # Document Store
//!
//! Repositories and the state-owning document service.
//!
//! This crate provides:
//! - [`DocumentRepository`], the async storage seam
//! - [`InMemoryDocumentRepository`], seeded with sample study notes
//! - [`SimulatedLatency`], a decorator adding artificial delays
//! - [`DocumentService`], which owns the client-side document state
//! - Listing helpers (category filter, sort order)
//!
//! ## Quick Start
//!
//! ```
//! use learnsphere_store::prelude::*;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<()> {
//! let config = DocumentConfig::default();
//! let repository = Arc::new(InMemoryDocumentRepository::seeded(config.clone()));
//! let service = DocumentService::new(repository, config);
//!
//! service.fetch_documents().await?;
//! let note = service.open_document("1").await?;
//! let backlinks = service.backlinks_for(&note.id).await?;
//! assert!(backlinks.iter().all(|link| link.target_id == note.id));
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! - `DocumentService` keeps its state behind `Arc<RwLock<...>>`
//! - Repositories are `Send + Sync` and shared through `Arc`
//! - Concurrent commands are serialized by the lock, nothing more

pub mod latency;
pub mod listing;
pub mod repository;
pub mod seed;
pub mod service;

pub use latency::SimulatedLatency;
pub use listing::{DocumentQuery, SortBy, categories, list_documents};
pub use repository::{DocumentRepository, InMemoryDocumentRepository, compute_metadata};
pub use seed::sample_documents;
pub use service::{DocumentService, DocumentState};

pub mod prelude {
    pub use crate::latency::*;
    pub use crate::listing::*;
    pub use crate::repository::*;
    pub use crate::service::*;
    pub use learnsphere_core::prelude::*;
}
