//! # panel-ui
//!
//! Display helpers for the exchange bot's admin panel: Persian-locale number
//! and date formatting, transient toast banners, and user confirmation.
//!
//! The formatting, toast, and dialog logic is host-independent and runs
//! natively. The `hydrate` feature adds the `browser` module, which binds
//! those pieces to the live document and exports them to page scripts.

pub mod config;
pub mod dialog;
pub mod error;
pub mod locale;
pub mod toast;

#[cfg(feature = "hydrate")]
pub mod browser;

pub use config::UiConfig;
pub use dialog::{ConfirmHost, PromptQueue, confirm_action};
pub use error::UiError;
pub use locale::date::{DisplayZone, format_date, format_date_in};
pub use locale::number::{NumberLike, format_number};
pub use toast::{Severity, ToastContent, ToastId, Toaster};
