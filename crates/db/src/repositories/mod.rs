//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod ad_source_repo;
pub mod admin_setting_repo;
pub mod app_repo;
pub mod event_repo;
pub mod payment_method_repo;
pub mod payment_receipt_repo;
pub mod user_repo;

pub use ad_source_repo::AdSourceRepo;
pub use admin_setting_repo::AdminSettingRepo;
pub use app_repo::AppRepo;
pub use event_repo::EventRepo;
pub use payment_method_repo::PaymentMethodRepo;
pub use payment_receipt_repo::PaymentReceiptRepo;
pub use user_repo::UserRepo;
