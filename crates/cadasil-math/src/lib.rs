//! CADASIL prognosis math utilities.

pub mod math;

pub use math::gompertz::*;
pub use math::hazard::*;
pub use math::interp::*;
pub use math::round::*;
