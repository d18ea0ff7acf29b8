//! Cross-feature building blocks shared by every frontend.

pub mod models;
pub mod utils;
