pub mod scroll;
pub mod skew;
pub mod touch;

pub use scroll::ScrollState;
pub use touch::{InertiaDecay, TouchState};
