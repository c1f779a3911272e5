//! App generation pipeline.
//!
//! [`JobRunner`] drives one `apps` row from `pending` to `completed` or
//! `failed`. It reaches the outside world only through the collaborators it
//! is constructed with: an [`AppStore`] for the record, a
//! [`SiteAnalyzer`](webtoapp_analysis::SiteAnalyzer) for the website report,
//! and the [`EventBus`](webtoapp_events::EventBus) for lifecycle events.

pub mod delays;
pub mod runner;
pub mod store;

pub use delays::GenerationDelays;
pub use runner::JobRunner;
pub use store::{AppStore, PgAppStore, StoreError};
