//! Persian (fa-IR) display formatting.
//!
//! SYSTEM CONTEXT
//! ==============
//! The admin panel renders balances, amounts, and timestamps the way a
//! Persian-locale browser would: Extended Arabic-Indic digits, Persian
//! separators, and Solar Hijri dates. These modules are pure and compile
//! natively, so the same output can be produced and tested off-browser.

pub mod calendar;
pub mod date;
pub mod digits;
pub mod number;
