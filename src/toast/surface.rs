//! Surfaces toasts can be attached to.
//!
//! A surface is the shared container banners are appended to. Attach
//! appends at the end; detach must tolerate ids that are already gone,
//! since a banner can be dismissed by the user before its timer fires.

use std::cell::RefCell;
use std::collections::HashMap;

use leptos::prelude::*;

use super::{Toast, ToastId};
use crate::error::UiError;

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

pub trait ToastSurface {
    /// Append a toast after any already attached.
    fn attach(&self, toast: &Toast) -> Result<(), UiError>;

    /// Remove a toast. Returns `false` (and does nothing) if it is absent.
    fn detach(&self, id: ToastId) -> bool;
}

/// Forget toasts the page removed on its own, such as through the
/// framework's dismiss control. Returns how many entries were dropped.
pub fn prune_detached<E>(entries: &mut HashMap<ToastId, E>, is_attached: impl Fn(&E) -> bool) -> usize {
    let before = entries.len();
    entries.retain(|_, el| is_attached(el));
    before - entries.len()
}

/// Host-independent surface holding toasts in attach order.
#[derive(Debug, Default)]
pub struct MemorySurface {
    toasts: RefCell<Vec<Toast>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.toasts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.borrow().is_empty()
    }

    pub fn contains(&self, id: ToastId) -> bool {
        self.toasts.borrow().iter().any(|t| t.id == id)
    }

    /// Copy of the attached toasts, oldest first.
    pub fn snapshot(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }
}

impl ToastSurface for MemorySurface {
    fn attach(&self, toast: &Toast) -> Result<(), UiError> {
        self.toasts.borrow_mut().push(toast.clone());
        Ok(())
    }

    fn detach(&self, id: ToastId) -> bool {
        let mut toasts = self.toasts.borrow_mut();
        let before = toasts.len();
        toasts.retain(|t| t.id != id);
        toasts.len() != before
    }
}

/// Reactive surface backed by a Leptos signal, rendered by `ToastStack`.
#[derive(Clone, Copy, Debug)]
pub struct SignalSurface {
    toasts: RwSignal<Vec<Toast>>,
}

impl SignalSurface {
    pub fn new() -> Self {
        Self { toasts: RwSignal::new(Vec::new()) }
    }

    pub fn signal(self) -> RwSignal<Vec<Toast>> {
        self.toasts
    }
}

impl Default for SignalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastSurface for SignalSurface {
    fn attach(&self, toast: &Toast) -> Result<(), UiError> {
        self.toasts.update(|toasts| toasts.push(toast.clone()));
        Ok(())
    }

    fn detach(&self, id: ToastId) -> bool {
        let present = self.toasts.with_untracked(|toasts| toasts.iter().any(|t| t.id == id));
        if present {
            self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
        }
        present
    }
}

/// Renders every toast on a `SignalSurface`, oldest first.
#[component]
pub fn ToastStack(surface: SignalSurface) -> impl IntoView {
    let toasts = surface.signal();

    view! {
        <div class="panel-toast-stack">
            {move || {
                toasts
                    .get()
                    .into_iter()
                    .map(|toast| {
                        view! {
                            <div
                                id=toast.id().dom_id()
                                class=toast.class_name()
                                style=toast.style()
                                role="alert"
                                inner_html=toast.inner_html()
                            ></div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
