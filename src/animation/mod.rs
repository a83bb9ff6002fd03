//! Eased view transitions emitted when the viewport recentres

pub mod transitions;

pub use transitions::{EasingType, ViewTransition};
