pub mod engine;
pub mod limiter;
pub mod order_source;

pub use engine::{ManualSyncOutcome, SyncEngine, SyncError, SyncStats};
pub use limiter::run_limited;
pub use order_source::HttpOrderSource;
