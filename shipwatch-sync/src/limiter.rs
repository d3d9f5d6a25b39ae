use std::future::Future;

use futures_util::stream::{FuturesUnordered, StreamExt};

/// Run every operation to completion with at most `limit` in flight at once.
///
/// Admission is a sliding window, not fixed batching: as soon as any slot
/// completes the next queued operation is admitted. Results come back in
/// completion order, which is not necessarily input order.
///
/// The limiter is strictly infallible: every operation yields a value, and
/// callers encode failure inside `T`. A limit of zero is clamped to one.
pub async fn run_limited<F, T>(ops: Vec<F>, limit: usize) -> Vec<T>
where
    F: Future<Output = T>,
{
    let limit = limit.max(1);
    let total = ops.len();
    let mut queued = ops.into_iter();

    let mut in_flight: FuturesUnordered<F> = queued.by_ref().take(limit).collect();
    let mut results = Vec::with_capacity(total);

    while let Some(result) = in_flight.next().await {
        results.push(result);
        if let Some(op) = queued.next() {
            in_flight.push(op);
        }
    }

    results
}
