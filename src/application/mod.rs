//! The watchface
//!
//! Everything that decides what ends up on screen: which layers exist, where
//! they sit, what text they show and how the custom ones are painted.

pub mod draw;
pub mod format;
pub mod layers;
pub mod layout;
pub mod locale;
pub mod watchface;

pub use self::watchface::Watchface;
