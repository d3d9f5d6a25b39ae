pub mod carrier;
pub mod classify;
pub mod models;
pub mod repository;
pub mod tracking;

pub use classify::{classify_status, LogisticsStatus};
pub use models::{LogisticsFailRecord, Order, OrderStatus, PendingOrder, StatusTransition, TrackingResult};
pub use repository::{OrderRepository, OrderSource};
pub use tracking::{MockTrackingProvider, RawTrackResult, TrackingClient, TrackingError, TrackingProvider};
