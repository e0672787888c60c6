// SPDX-License-Identifier: MPL-2.0
//! Diagnostics domain types.
//!
//! - [`LogCapacity`]: how many activity records the session keeps

mod newtypes;

pub use newtypes::{log_capacity_bounds, LogCapacity};
