//! Layout calculation modules for print sheets
//!
//! This module handles all the geometric calculations for a sheet:
//! - Grid capacity (how many slots fit on the paper)
//! - Slot placement (centering, fill order, subject assignment)
//! - Scaling a subject into its slot

mod grid;
mod placement;
mod types;

pub use grid::*;
pub use placement::*;
pub use types::*;
