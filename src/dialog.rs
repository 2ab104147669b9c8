//! Yes/no confirmation before destructive admin actions.
//!
//! DESIGN
//! ======
//! A confirmation is modeled as a future that resolves once the user has
//! answered, rather than a call that blocks the thread. `NativeConfirm`
//! (browser only) answers through `window.confirm`; `PromptQueue` hands the
//! question to an in-page dialog over a channel and waits for its answer.
//! There is no timeout: only the user resolves a prompt.

use futures::channel::{mpsc, oneshot};
use futures::future::LocalBoxFuture;
use futures::{FutureExt, StreamExt};

use crate::error::UiError;

#[cfg(test)]
#[path = "dialog_test.rs"]
mod dialog_test;

/// Something that can put a yes/no question to the user.
pub trait ConfirmHost {
    /// Resolve to `true` if the user accepts, `false` otherwise.
    fn confirm<'a>(&'a self, message: &'a str) -> LocalBoxFuture<'a, Result<bool, UiError>>;
}

/// Ask the user to confirm `message`. Does not resolve before the host does.
pub async fn confirm_action<H: ConfirmHost + ?Sized>(host: &H, message: &str) -> Result<bool, UiError> {
    log::debug!("confirm requested: {message}");
    let accepted = host.confirm(message).await?;
    log::debug!("confirm resolved: accepted={accepted}");
    Ok(accepted)
}

/// A pending question handed to the in-page dialog.
#[derive(Debug)]
pub struct ConfirmRequest {
    message: String,
    responder: oneshot::Sender<bool>,
}

impl ConfirmRequest {
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Answer the question. An unanswered request that is dropped counts as
    /// declined.
    pub fn respond(self, accepted: bool) {
        if self.responder.send(accepted).is_err() {
            log::debug!("confirm answered after the caller went away");
        }
    }

    pub fn accept(self) {
        self.respond(true);
    }

    pub fn decline(self) {
        self.respond(false);
    }
}

/// Channel-backed `ConfirmHost`. The UI side consumes `ConfirmRequest`s
/// from the paired `PromptReceiver`.
#[derive(Clone, Debug)]
pub struct PromptQueue {
    requests: mpsc::UnboundedSender<ConfirmRequest>,
}

/// UI end of a `PromptQueue`.
#[derive(Debug)]
pub struct PromptReceiver {
    requests: mpsc::UnboundedReceiver<ConfirmRequest>,
}

impl PromptQueue {
    pub fn new() -> (Self, PromptReceiver) {
        let (tx, rx) = mpsc::unbounded();
        (Self { requests: tx }, PromptReceiver { requests: rx })
    }
}

impl PromptReceiver {
    /// Wait for the next question. `None` once every queue handle is gone.
    pub async fn recv(&mut self) -> Option<ConfirmRequest> {
        self.requests.next().await
    }

    /// Take a question if one is already waiting.
    pub fn try_recv(&mut self) -> Option<ConfirmRequest> {
        self.requests.next().now_or_never().flatten()
    }
}

impl ConfirmHost for PromptQueue {
    fn confirm<'a>(&'a self, message: &'a str) -> LocalBoxFuture<'a, Result<bool, UiError>> {
        async move {
            let (responder, answer) = oneshot::channel();
            let request = ConfirmRequest { message: message.to_owned(), responder };
            if self.requests.unbounded_send(request).is_err() {
                log::warn!("confirm dialog is not mounted");
                return Err(UiError::HostUnavailable("confirm dialog"));
            }
            Ok(answer.await.unwrap_or(false))
        }
        .boxed_local()
    }
}
