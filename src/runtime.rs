//! Runtime abstraction for fire-and-forget background work
//!
//! The map core never awaits anything itself. Work such as fetching the feature
//! file is handed to whatever async runtime is around, or to a detached thread
//! when there is none.

use futures::Future;

/// Spawns `future` without keeping a handle to it.
///
/// With the `tokio-runtime` feature the future joins the ambient tokio runtime
/// when called from inside one; otherwise it runs to completion on a detached
/// thread (with its own current-thread runtime when tokio is available, so
/// `reqwest` still finds a reactor).
pub fn spawn_detached<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    #[cfg(feature = "tokio-runtime")]
    {
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            log::debug!("spawning background task on ambient tokio runtime");
            handle.spawn(future);
            return;
        }
    }

    let spawned = std::thread::Builder::new()
        .name("cadastre-map-bg".to_string())
        .spawn(move || block_on(future));
    if let Err(e) = spawned {
        log::warn!("failed to start background thread: {}", e);
    }
}

#[cfg(feature = "tokio-runtime")]
fn block_on<F: Future<Output = ()>>(future: F) {
    match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt.block_on(future),
        Err(e) => log::warn!("failed to build background runtime: {}", e),
    }
}

#[cfg(not(feature = "tokio-runtime"))]
fn block_on<F: Future<Output = ()>>(future: F) {
    futures::executor::block_on(future)
}
