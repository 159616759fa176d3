//! FoundIt verification helpers.
//!
//! Pure functions shared by the API layer: scoring a claim's answers against
//! an item's answer key, and validating founder input (question sets, image
//! uploads) before anything touches the store.

pub mod image;
pub mod questions;
pub mod scoring;

pub use image::{ImageError, MAX_IMAGE_BYTES, validate_image};
pub use questions::{QuestionError, validate_answers, validate_questions};
pub use scoring::{meets_threshold, score};
