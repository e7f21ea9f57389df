//! Concrete curve implementations.
//!
//! - [`DiscreteCurve`]: Pillar points with linear interpolation
//! - [`FlatCurve`]: A single constant value

mod discrete;
mod flat;

pub use discrete::DiscreteCurve;
pub use flat::FlatCurve;
