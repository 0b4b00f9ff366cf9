//! Software rendering: pixel buffers, compositing, shadows.
//!
//! Everything here works on packed 32-bit ARGB cells where `0` is the
//! reserved transparent/empty sentinel.

pub mod blend;
pub mod buffer;
pub mod compose;
pub mod shadow;

pub use blend::{blend, blur};
pub use buffer::{Bounds, ImageBuffer};
pub use compose::compose;
pub use shadow::cast_shadows;
