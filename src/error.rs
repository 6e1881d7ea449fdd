// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong while carving.

use crate::seamfinder::Orientation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CarveError {
    /// A seam cannot be taken from an image that is one pixel across
    /// in the shrinking dimension.
    #[error("cannot remove a {orientation} seam, image is only {size} pixel(s) across")]
    TooSmall { orientation: Orientation, size: u32 },

    #[error("seam has {actual} offsets, the image needs {expected}")]
    SeamLength { expected: usize, actual: usize },

    #[error("seam offset {offset} at position {index} is outside 0..{limit}")]
    SeamOffset { index: usize, offset: u32, limit: u32 },

    #[error("seams of length {left} and {right} cannot be compared")]
    SeamMismatch { left: usize, right: usize },

    #[error("target {target_width}x{target_height} must lie within 1x1..={width}x{height}")]
    TargetOutOfRange {
        target_width: u32,
        target_height: u32,
        width: u32,
        height: u32,
    },

    #[error("{len} pixels cannot fill a {width}x{height} image")]
    BufferShape { width: u32, height: u32, len: usize },

    #[error("unknown seam strategy '{0}', expected 'dp' or 'greedy'")]
    UnknownStrategy(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, CarveError>;
