//! WebToApp event bus and outbound notifications.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`] -- the canonical domain event envelope.
//! - [`EventPersistence`] -- background service that writes every event to
//!   the `events` table.
//! - [`Notifier`] -- outbound user notifications, delivered by SMTP
//!   ([`EmailDelivery`]) or written to the log ([`LogNotifier`]).

pub mod bus;
pub mod delivery;
pub mod notifier;
pub mod persistence;
pub mod templates;

pub use bus::{EventBus, PlatformEvent};
pub use delivery::email::{EmailConfig, EmailDelivery, EmailError};
pub use notifier::{LogNotifier, Notification, Notifier};
pub use persistence::EventPersistence;
