//! Process-wide Ctrl-C fan-out.
//!
//! One task owns the SIGINT listener for the life of the process and bumps a
//! counter on every press. Prompts and dispatch runs hold their own receivers
//! and only react to presses that arrive while they wait.

use {tokio::sync::watch, tracing::warn};

#[derive(Clone)]
pub struct Interrupts {
    rx: watch::Receiver<u64>,
}

impl Interrupts {
    /// Start listening for Ctrl-C. Must be called from within the runtime.
    pub fn listen() -> Self {
        let (tx, rx) = watch::channel(0);
        tokio::spawn(async move {
            loop {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!(error = %e, "failed to listen for Ctrl-C");
                    return;
                }
                tx.send_modify(|presses| *presses += 1);
            }
        });
        Self { rx }
    }

    /// A source fired by hand instead of by SIGINT.
    #[cfg(test)]
    pub fn manual() -> (watch::Sender<u64>, Self) {
        let (tx, rx) = watch::channel(0);
        (tx, Self { rx })
    }

    /// Forget presses that happened before now.
    pub fn reset(&mut self) {
        let _ = self.rx.borrow_and_update();
    }

    /// A receiver that ignores every press before this call.
    pub fn subscribe(&self) -> Self {
        let mut fresh = self.clone();
        fresh.reset();
        fresh
    }

    /// Resolve on the next press. Never resolves once the listener is gone.
    pub async fn next(&mut self) {
        if self.rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
