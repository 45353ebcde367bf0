//! Best-effort extraction of imagery and body text from arbitrary HTML
//!
//! Both extractors are heuristic cascades: an ordered list of strategies
//! tried until one succeeds. They return sentinels or `None` for pages they
//! cannot read; they never fail a batch.

mod body;
mod image;

pub use body::{extract_body, ExtractedBody, BODY_NOT_FOUND, NO_TITLE};
pub use image::{extract_image, normalize_image_url};
