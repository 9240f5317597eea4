use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use tokio::task::JoinHandle;
use tracing::{error, warn};

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Run `f`, logging instead of unwinding if it panics. Returns whether `f` finished.
///
/// Only the panic of `f` itself is caught; threads or tasks it starts are on their own.
pub fn go_with_recover<F: FnOnce()>(f: F) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => true,
        Err(payload) => {
            error!("Recovered from panic: {}", panic_message(payload.as_ref()));
            false
        }
    }
}

/// Spawn `fut` on tokio. The handle yields `None` when the task panicked or was cancelled.
pub fn spawn_with_recover<F>(fut: F) -> JoinHandle<Option<F::Output>>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let inner = tokio::spawn(fut);
    tokio::spawn(async move {
        match inner.await {
            Ok(output) => Some(output),
            Err(e) if e.is_panic() => {
                error!("Recovered from task panic: {}", panic_message(e.into_panic().as_ref()));
                None
            }
            Err(e) => {
                warn!("Task did not finish: {}", e);
                None
            }
        }
    })
}

/// Numeric id of the current thread. Only meant for debug output.
pub fn current_thread_id() -> u64 {
    let id = format!("{:?}", std::thread::current().id());
    id.trim_start_matches("ThreadId(")
        .trim_end_matches(')')
        .parse()
        .unwrap_or_default()
}
