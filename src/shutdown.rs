use tokio_util::sync::CancellationToken;

/// Cancels `token` on Ctrl+C or SIGTERM (Ctrl+C only off Unix).
pub fn listen_for_shutdown(token: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            signal = wait_for_signal() => {
                tracing::info!("Received {signal}, shutting down after the current cycle");
                token.cancel();
            }
            _ = token.cancelled() => {}
        }
    })
}

#[cfg(unix)]
async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term_signal = match signal(SignalKind::terminate()) {
        Ok(sig) => Some(sig),
        Err(err) => {
            tracing::warn!("Failed to install SIGTERM handler: {err}. Only Ctrl+C will stop the generator");
            None
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => "SIGINT",
        _ = async {
            match term_signal.as_mut() {
                Some(sig) => {
                    sig.recv().await;
                }
                None => std::future::pending::<()>().await,
            }
        } => "SIGTERM",
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> &'static str {
    let _ = tokio::signal::ctrl_c().await;
    "Ctrl+C"
}
