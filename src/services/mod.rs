//! Page-side list shaping and the payment hand-off.
//!
//! Nothing here decides tournament outcomes; standings, fixtures and
//! results come from the backend. These modules only filter, order and
//! paginate what it returns, and prepare the eSewa redirect.

pub mod listing;
pub mod payment;
pub mod schedule;
pub mod standings;
