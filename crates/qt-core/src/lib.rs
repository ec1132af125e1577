//! qt-core: shared foundation for the quadruple-tank simulator.
//!
//! Contains:
//! - units (uom pump capacity conversion + cm/s constants)
//! - numeric (tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{QtError, QtResult};
pub use numeric::*;
pub use units::*;
