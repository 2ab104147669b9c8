//! Browser hosts for the panel helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Compiled only with the `hydrate` feature. Provides the live-document
//! implementations of the toast surface, removal scheduler, and
//! confirmation host, plus the page-level entry points exported to the
//! panel's existing page scripts under their original names.
//!
//! TRADE-OFFS
//! ==========
//! `confirmAction` keeps the native blocking `window.confirm` for legacy
//! callers; Rust callers should prefer the async `confirm`.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;

use crate::config::UiConfig;
use crate::dialog::{ConfirmHost, confirm_action};
use crate::error::UiError;
use crate::locale::date::{DisplayZone, format_date_in};
use crate::locale::number::{coerce_script_value, format_float};
use crate::toast::surface::prune_detached;
use crate::toast::{
    Scheduler, Severity, TimerHandle, Toast, ToastContent, ToastId, ToastSurface, Toaster, script_toast,
};

/// Id of the inline JSON config block read by `load_config`.
pub const CONFIG_ELEMENT_ID: &str = "panel-ui-config";

fn js_error(value: JsValue) -> UiError {
    UiError::Host(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

fn document() -> Result<web_sys::Document, UiError> {
    web_sys::window()
        .ok_or(UiError::HostUnavailable("window"))?
        .document()
        .ok_or(UiError::HostUnavailable("document"))
}

// =============================================================================
// SURFACE
// =============================================================================

/// Toast surface appending banner elements to a DOM container.
pub struct DomSurface {
    container: web_sys::HtmlElement,
    elements: RefCell<HashMap<ToastId, web_sys::Element>>,
}

impl DomSurface {
    pub fn new(container: web_sys::HtmlElement) -> Self {
        Self { container, elements: RefCell::new(HashMap::new()) }
    }

    /// Surface over `document.body`.
    pub fn body() -> Result<Self, UiError> {
        let body = document()?.body().ok_or(UiError::HostUnavailable("document.body"))?;
        Ok(Self::new(body))
    }
}

impl ToastSurface for DomSurface {
    fn attach(&self, toast: &Toast) -> Result<(), UiError> {
        let el = document()?.create_element("div").map_err(js_error)?;
        el.set_id(&toast.id().dom_id());
        el.set_class_name(&toast.class_name());
        el.set_attribute("style", &toast.style()).map_err(js_error)?;
        el.set_attribute("role", "alert").map_err(js_error)?;
        el.set_inner_html(&toast.inner_html());
        self.container.append_child(&el).map_err(js_error)?;
        let mut elements = self.elements.borrow_mut();
        let closed = prune_detached(&mut *elements, |node: &web_sys::Element| node.is_connected());
        if closed > 0 {
            log::debug!("forgot {closed} toast(s) closed by the page");
        }
        elements.insert(toast.id(), el);
        Ok(())
    }

    fn detach(&self, id: ToastId) -> bool {
        let Some(el) = self.elements.borrow_mut().remove(&id) else {
            return false;
        };
        // The dismiss button may already have taken it out of the tree.
        let connected = el.is_connected();
        el.remove();
        connected
    }
}

// =============================================================================
// SCHEDULER
// =============================================================================

/// `setTimeout`-backed scheduler.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

/// Owns a pending `setTimeout`. Cancelling clears the timeout and frees
/// the task; dropping an unfired timer leaves the timeout armed.
pub struct BrowserTimer {
    timeout: Option<Timeout>,
    fired: Rc<Cell<bool>>,
}

impl Scheduler for TimeoutScheduler {
    type Timer = BrowserTimer;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> BrowserTimer {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let timeout = Timeout::new(millis, move || {
            flag.set(true);
            task();
        });
        BrowserTimer { timeout: Some(timeout), fired }
    }
}

impl TimerHandle for BrowserTimer {
    fn cancel(mut self) {
        if let Some(timeout) = self.timeout.take() {
            drop(timeout.cancel());
        }
    }
}

impl Drop for BrowserTimer {
    fn drop(&mut self) {
        // A fired timeout drops normally; an armed one must outlive its handle.
        if let Some(timeout) = self.timeout.take() {
            if !self.fired.get() {
                let _armed = timeout.forget();
            }
        }
    }
}

// =============================================================================
// DIALOG
// =============================================================================

/// `window.confirm`. Blocks the page until answered, then resolves.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeConfirm;

impl ConfirmHost for NativeConfirm {
    fn confirm<'a>(&'a self, message: &'a str) -> LocalBoxFuture<'a, Result<bool, UiError>> {
        async move {
            let window = web_sys::window().ok_or(UiError::HostUnavailable("window"))?;
            window.confirm_with_message(message).map_err(js_error)
        }
        .boxed_local()
    }
}

// =============================================================================
// PAGE
// =============================================================================

/// Read `UiConfig` from the page's inline JSON block, or defaults.
pub fn load_config() -> UiConfig {
    let raw = document()
        .map(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text_content()))
        .unwrap_or_default();
    match raw {
        Some(raw) => UiConfig::from_json(&raw).unwrap_or_else(|e| {
            log::warn!("ignoring panel config ({}): {e}", e.error_code());
            UiConfig::default()
        }),
        None => UiConfig::default(),
    }
}

/// Install the panic hook and console logger. Returns the loaded config.
pub fn init() -> UiConfig {
    console_error_panic_hook::set_once();
    let config = load_config();
    if console_log::init_with_level(config.log_level()).is_err() {
        log::debug!("console logger already installed");
    }
    config
}

#[wasm_bindgen(start)]
pub fn start() {
    let config = init();
    log::debug!("panel-ui ready (toast lifetime {} ms)", config.toast_lifetime_ms);
}

struct PageUi {
    toaster: Toaster<DomSurface, TimeoutScheduler>,
    zone: DisplayZone,
}

impl PageUi {
    fn new(config: &UiConfig) -> Result<Self, UiError> {
        let toaster = Toaster::with_config(Rc::new(DomSurface::body()?), TimeoutScheduler, config);
        let zone = config.display_zone().unwrap_or_else(DisplayZone::host);
        Ok(Self { toaster, zone })
    }
}

thread_local! {
    static PAGE: RefCell<Option<PageUi>> = const { RefCell::new(None) };
}

fn with_page<R>(f: impl FnOnce(&PageUi) -> R) -> Result<R, UiError> {
    PAGE.with(|cell| {
        if cell.borrow().is_none() {
            let page = PageUi::new(&load_config())?;
            *cell.borrow_mut() = Some(page);
        }
        let page = cell.borrow();
        page.as_ref().map(f).ok_or(UiError::HostUnavailable("page"))
    })
}

/// Show a toast on `document.body`.
pub fn show_toast(content: impl Into<ToastContent>, severity: Severity) -> Result<ToastId, UiError> {
    let content = content.into();
    with_page(|page| page.toaster.show(content, severity))?
}

/// Remove a page toast now.
pub fn dismiss_toast(id: ToastId) -> Result<bool, UiError> {
    with_page(|page| page.toaster.dismiss(id))
}

/// Format a date in the page's configured display zone.
pub fn format_date(value: Option<&str>) -> String {
    let zone = with_page(|page| page.zone).unwrap_or_else(|_| DisplayZone::host());
    format_date_in(value, zone)
}

/// Ask through `window.confirm`.
pub async fn confirm(message: &str) -> Result<bool, UiError> {
    confirm_action(&NativeConfirm, message).await
}

// =============================================================================
// PAGE SCRIPT EXPORTS
// =============================================================================

#[wasm_bindgen]
extern "C" {
    /// The global `String` conversion, as `parseFloat` applies it.
    #[wasm_bindgen(js_name = String, catch)]
    fn js_string(value: &JsValue) -> Result<String, JsValue>;
}

#[wasm_bindgen(js_name = formatNumber)]
pub fn format_number_js(value: JsValue) -> String {
    let number = value.as_f64();
    let text = match number {
        Some(_) => None,
        None => js_string(&value).ok(),
    };
    format_float(coerce_script_value(number, text.as_deref()))
}

#[wasm_bindgen(js_name = formatDate)]
pub fn format_date_js(value: Option<String>) -> String {
    format_date(value.as_deref())
}

/// `showToast(message, severity?, markup?)`. The message is escaped unless
/// `markup` is `true`.
#[wasm_bindgen(js_name = showToast)]
pub fn show_toast_js(message: String, severity: Option<String>, markup: Option<bool>) -> Result<f64, JsValue> {
    let (content, severity) = script_toast(message, severity.as_deref(), markup);
    let id = show_toast(content, severity).map_err(|e| JsValue::from_str(&e.to_string()))?;
    #[allow(clippy::cast_precision_loss)]
    let id = id.get() as f64;
    Ok(id)
}

#[wasm_bindgen(js_name = confirmAction)]
pub fn confirm_action_js(message: String) -> Result<bool, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    window.confirm_with_message(&message)
}
