#![doc(test(attr(deny(warnings))))]

//! Contract Fields formats the money, percentage and validity-date inputs of a
//! contract and insurance policy form.
//!
//! The leaf modules `format` and `dates` are pure conversions, `fields` models
//! the live inputs and `form` wires them onto a page.

pub mod config;
pub mod dates;
pub mod errors;
pub mod fields;
pub mod form;
pub mod format;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Contract Fields tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
