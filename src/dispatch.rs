use std::future::Future;

use tokio_util::task::AbortOnDropHandle;

use crate::error::Error;

/// Run one request in the background and hand its outcome to `handler`.
///
/// For callers driven by UI events: the calling thread never waits, and the
/// handler owns whatever state it needs to apply the result. The request
/// lives as long as the returned handle: dropping it, or calling
/// [`abort`](AbortOnDropHandle::abort), cancels the request and the handler
/// never runs. Keep the handle for as long as the result is wanted.
///
/// Must be called from within a Tokio runtime.
///
/// ```rust,ignore
/// let client = client.clone();
/// let token = session.token.clone();
/// let pending = spawn_with_handler(
///     async move { client.create_review(&token, &new_review).await },
///     move |result| match result {
///         Ok(review) => reviews.lock().unwrap().prepend(review),
///         Err(e) => tracing::warn!(error = %e, "Could not post review"),
///     },
/// );
/// // Store `pending` on the screen; dropping it with the screen cancels the request.
/// ```
pub fn spawn_with_handler<F, T, H>(request: F, handler: H) -> AbortOnDropHandle<()>
where
    F: Future<Output = Result<T, Error>> + Send + 'static,
    T: Send + 'static,
    H: FnOnce(Result<T, Error>) + Send + 'static,
{
    AbortOnDropHandle::new(tokio::spawn(async move {
        let result = request.await;
        handler(result);
    }))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn handler_receives_result() {
        let (tx, rx) = tokio::sync::oneshot::channel();

        spawn_with_handler(async { Ok::<_, Error>(7) }, move |result| {
            let _ = tx.send(result.map_err(|e| e.to_string()));
        })
        .await
        .unwrap();

        assert_eq!(rx.await.unwrap(), Ok(7));
    }

    #[tokio::test]
    async fn handler_receives_error() {
        let (tx, rx) = tokio::sync::oneshot::channel();

        let _pending = spawn_with_handler(
            async { Err::<(), _>(Error::Config("boom".into())) },
            move |result| {
                let _ = tx.send(result.is_err());
            },
        );

        assert!(rx.await.unwrap());
    }

    #[tokio::test]
    async fn aborted_request_never_reaches_handler() {
        let (tx, mut rx) = tokio::sync::oneshot::channel::<()>();

        let handle = spawn_with_handler(
            async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok::<_, Error>(())
            },
            move |_| {
                let _ = tx.send(());
            },
        );
        handle.abort();

        assert!(handle.await.unwrap_err().is_cancelled());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn dropped_handle_cancels_request() {
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let handle = spawn_with_handler(
            async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok::<_, Error>(())
            },
            move |_| {
                let _ = tx.send(());
            },
        );
        drop(handle);

        // The sender is dropped with the cancelled task instead of being used.
        let outcome = tokio::time::timeout(Duration::from_secs(5), rx).await;
        assert!(matches!(outcome, Ok(Err(_))), "handler ran after drop");
    }
}
