//! Transient notification banners.
//!
//! SYSTEM CONTEXT
//! ==============
//! Admin actions (approve, reject, lock) report their outcome with a banner
//! pinned to the top-center of the viewport. Each banner removes itself
//! after a fixed lifetime; several may be on screen at once.
//!
//! DESIGN
//! ======
//! `Toaster` owns no DOM. It attaches toasts to an injected `ToastSurface`
//! and schedules removal on an injected `Scheduler`, so the same logic runs
//! against the live document, a Leptos signal, or an in-memory surface in
//! tests. The returned `ToastId` is the token for cancelling removal.
//!
//! Message text is escaped unless the caller opts into `ToastContent::Markup`.

pub mod scheduler;
pub mod surface;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::config::UiConfig;
use crate::error::UiError;

pub use scheduler::{ManualScheduler, ManualTimer, Scheduler, TimerHandle};
pub use surface::{MemorySurface, SignalSurface, ToastStack, ToastSurface};

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

/// Bootstrap positioning and animation classes shared by every banner.
const BANNER_CLASSES: &str = "alert-dismissible fade show position-fixed top-0 start-50 translate-middle-x mt-3";

/// Close control wired up by the CSS framework's `data-bs-dismiss` handler.
pub const DISMISS_BUTTON: &str = r#"<button type="button" class="btn-close" data-bs-dismiss="alert"></button>"#;

/// Identifies one shown toast. Ids increase monotonically per `Toaster`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    pub fn get(self) -> u64 {
        self.0
    }

    /// Element id used when the toast is rendered into a document.
    pub fn dom_id(self) -> String {
        format!("panel-toast-{}", self.0)
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visual severity of a toast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

impl Severity {
    /// Map a page-script severity tag. Anything other than `error` or
    /// `success` is treated as info, including unknown tags.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "error" => Self::Error,
            "success" => Self::Success,
            _ => Self::Info,
        }
    }

    pub fn alert_class(self) -> &'static str {
        match self {
            Self::Info => "alert-info",
            Self::Success => "alert-success",
            Self::Error => "alert-danger",
        }
    }
}

impl From<&str> for Severity {
    fn from(tag: &str) -> Self {
        Self::from_tag(tag)
    }
}

/// Body of a toast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToastContent {
    /// Plain text, escaped before rendering.
    Text(String),
    /// Caller-trusted markup, rendered verbatim.
    Markup(String),
}

impl ToastContent {
    pub fn to_html(&self) -> String {
        match self {
            Self::Text(text) => escape_html(text),
            Self::Markup(markup) => markup.clone(),
        }
    }
}

impl From<&str> for ToastContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for ToastContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Map a page-script `showToast(message, severity, markup)` call. The
/// message is text unless `markup` is explicitly `true`; a missing or
/// unknown severity is info.
pub fn script_toast(message: String, severity: Option<&str>, markup: Option<bool>) -> (ToastContent, Severity) {
    let content = if markup == Some(true) { ToastContent::Markup(message) } else { ToastContent::Text(message) };
    (content, severity.map(Severity::from_tag).unwrap_or_default())
}

/// One banner as attached to a surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    id: ToastId,
    severity: Severity,
    content: ToastContent,
    z_index: i32,
}

impl Toast {
    pub fn id(&self) -> ToastId {
        self.id
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn content(&self) -> &ToastContent {
        &self.content
    }

    /// Full class attribute for the banner element.
    pub fn class_name(&self) -> String {
        format!("alert {} {BANNER_CLASSES}", self.severity.alert_class())
    }

    /// Inline style for the banner element.
    pub fn style(&self) -> String {
        format!("z-index: {}", self.z_index)
    }

    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Banner body followed by the dismiss control.
    pub fn inner_html(&self) -> String {
        format!("{}{DISMISS_BUTTON}", self.content.to_html())
    }
}

/// Shows toasts on a surface and removes them after their lifetime.
pub struct Toaster<S, C>
where
    S: ToastSurface + 'static,
    C: Scheduler,
{
    surface: Rc<S>,
    scheduler: C,
    lifetime: Duration,
    z_index: i32,
    next_id: Cell<u64>,
    pending: Rc<RefCell<HashMap<ToastId, C::Timer>>>,
}

impl<S, C> Toaster<S, C>
where
    S: ToastSurface + 'static,
    C: Scheduler,
{
    pub fn new(surface: Rc<S>, scheduler: C) -> Self {
        Self::with_config(surface, scheduler, &UiConfig::default())
    }

    pub fn with_config(surface: Rc<S>, scheduler: C, config: &UiConfig) -> Self {
        Self {
            surface,
            scheduler,
            lifetime: config.toast_lifetime(),
            z_index: config.toast_z_index,
            next_id: Cell::new(1),
            pending: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    pub fn surface(&self) -> &Rc<S> {
        &self.surface
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Number of toasts whose removal is still scheduled.
    pub fn pending_removals(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Attach a toast now and schedule its removal after the lifetime.
    ///
    /// Every call produces a new banner; there is no de-duplication,
    /// queueing, or visible cap.
    pub fn show(&self, content: impl Into<ToastContent>, severity: Severity) -> Result<ToastId, UiError> {
        let id = ToastId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let toast = Toast { id, severity, content: content.into(), z_index: self.z_index };
        self.surface.attach(&toast)?;
        log::debug!("toast {id} attached ({})", severity.alert_class());

        let surface = Rc::clone(&self.surface);
        let pending = Rc::downgrade(&self.pending);
        let timer = self.scheduler.schedule(
            self.lifetime,
            Box::new(move || {
                if let Some(pending) = pending.upgrade() {
                    pending.borrow_mut().remove(&id);
                }
                // Already gone if the user dismissed it first.
                if surface.detach(id) {
                    log::debug!("toast {id} expired");
                }
            }),
        );
        self.pending.borrow_mut().insert(id, timer);
        Ok(id)
    }

    /// Keep a toast on screen by cancelling its scheduled removal.
    /// Returns `false` if nothing was pending for `id`.
    pub fn cancel_removal(&self, id: ToastId) -> bool {
        let timer = self.pending.borrow_mut().remove(&id);
        match timer {
            Some(timer) => {
                timer.cancel();
                log::debug!("toast {id} removal cancelled");
                true
            }
            None => false,
        }
    }

    /// Remove a toast immediately and cancel its scheduled removal.
    /// Returns `false` if it was no longer attached.
    pub fn dismiss(&self, id: ToastId) -> bool {
        self.cancel_removal(id);
        self.surface.detach(id)
    }
}

/// Escape text for insertion as HTML element content.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
