// SPDX-License-Identifier: MPL-2.0
//! Pure domain types: validated value objects with no I/O.

pub mod diagnostics;
pub mod editing;
