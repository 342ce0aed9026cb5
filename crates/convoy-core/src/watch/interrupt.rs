use tokio_util::sync::CancellationToken;
use tracing::info;

/// Cancel `token` on SIGINT or SIGTERM.
///
/// The handlers are registered before this returns, so a signal delivered
/// any time afterwards is observed. Must be called inside a tokio runtime.
#[cfg(unix)]
pub fn arm_interrupt_listener(token: CancellationToken) -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::spawn(async move {
        tokio::select! {
            _ = sigint.recv() => {
                info!(event = "core.watch.signal_received", signal = "SIGINT");
            }
            _ = sigterm.recv() => {
                info!(event = "core.watch.signal_received", signal = "SIGTERM");
            }
            _ = token.cancelled() => return,
        }
        token.cancel();
    });

    Ok(())
}

/// Cancel `token` on Ctrl-C.
#[cfg(not(unix))]
pub fn arm_interrupt_listener(token: CancellationToken) -> std::io::Result<()> {
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if result.is_ok() {
                    info!(event = "core.watch.signal_received", signal = "SIGINT");
                    token.cancel();
                }
            }
            _ = token.cancelled() => {}
        }
    });

    Ok(())
}
