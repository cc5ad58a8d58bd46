//! Task-local trace context for web requests.
//!
//! Lets error rendering read the current request's trace id without
//! threading it through every call. Service and repo code should not import
//! this module; it belongs to the web boundary.

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

/// Trace id of the current task, or "unknown" outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|id| id.clone())
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run a future with the given trace id in scope. Used by the request trace
/// middleware to establish the task-local.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
