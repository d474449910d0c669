//! Mathematical utilities: axis/signal normalization and the Vandermonde
//! least-squares machinery.

pub mod design;
pub mod scaling;

pub use design::*;
pub use scaling::*;
