//! Core math modules.

pub mod gompertz;
pub mod hazard;
pub mod interp;
pub mod round;
