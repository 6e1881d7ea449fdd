// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main loop
//!
//! Seam removal, shared by every seam finder, and the carver that
//! repeatedly recomputes energy, finds the cheaper of a vertical and a
//! horizontal seam, and removes it until the image reaches its target
//! size.

use crate::cq;
use crate::energy::{compute_energy, seam_energy};
use crate::error::{CarveError, Result};
use crate::grid::Grid;
use crate::pixelbuffer::PixelBuffer;
use crate::seamfinder::{Orientation, Seam, SeamFinder, Strategy};
use log::{debug, info, warn};

// A seam must have one offset per row (or column), each of which is
// inside the image.  Nothing is touched until this passes.
fn check_seam(buffer: &PixelBuffer, seam: &[u32], orientation: Orientation) -> Result<()> {
    let (width, height) = buffer.dimensions();
    let span = orientation.span(width, height);
    if span <= 1 {
        warn!("cannot remove {} seam, image is too small", orientation);
        return Err(CarveError::TooSmall {
            orientation,
            size: span,
        });
    }
    let expected = orientation.seam_length(width, height);
    if seam.len() != expected {
        return Err(CarveError::SeamLength {
            expected,
            actual: seam.len(),
        });
    }
    match seam.iter().position(|&offset| offset >= span) {
        Some(index) => Err(CarveError::SeamOffset {
            index,
            offset: seam[index],
            limit: span,
        }),
        None => Ok(()),
    }
}

/// Remove one top-to-bottom seam: in every row, the pixel at the
/// seam's x coordinate goes and the rest close ranks.  The width
/// drops by one.  On error the buffer is left exactly as it was.
pub fn remove_vertical_seam(buffer: &mut PixelBuffer, seam: &[u32]) -> Result<()> {
    check_seam(buffer, seam, Orientation::Vertical)?;
    let (width, height) = buffer.dimensions();
    let pixels = buffer
        .pixels()
        .chunks(width as usize)
        .zip(seam)
        .flat_map(|(row, &cut)| {
            row.iter()
                .enumerate()
                .filter(move |&(x, _)| x != cut as usize)
                .map(|(_, p)| *p)
        })
        .collect();
    buffer.replace(width - 1, height, pixels)?;
    debug!("removed vertical seam, now {}x{}", width - 1, height);
    Ok(())
}

/// Remove one left-to-right seam: in every column, the pixel at the
/// seam's y coordinate goes and the pixels below move up.  The height
/// drops by one.  On error the buffer is left exactly as it was.
pub fn remove_horizontal_seam(buffer: &mut PixelBuffer, seam: &[u32]) -> Result<()> {
    check_seam(buffer, seam, Orientation::Horizontal)?;
    let (width, height) = buffer.dimensions();
    // Row-major order is kept by walking the output rows: output row y
    // of column x is source row y, or y + 1 once past the cut.
    let source = buffer.pixels();
    let pixels = (0..height - 1)
        .flat_map(move |y| {
            (0..width).map(move |x| {
                let sy = if y < seam[x as usize] { y } else { y + 1 };
                source[(sy * width + x) as usize]
            })
        })
        .collect();
    buffer.replace(width, height - 1, pixels)?;
    debug!("removed horizontal seam, now {}x{}", width, height - 1);
    Ok(())
}

/// Remove a seam of either orientation.
pub fn remove_seam(buffer: &mut PixelBuffer, seam: &[u32], orientation: Orientation) -> Result<()> {
    match orientation {
        Orientation::Vertical => remove_vertical_seam(buffer, seam),
        Orientation::Horizontal => remove_horizontal_seam(buffer, seam),
    }
}

/// What the carver is asked to do: shrink to `target_width` ×
/// `target_height` with the given seam finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarveOptions {
    pub target_width: u32,
    pub target_height: u32,
    pub strategy: Strategy,
}

impl CarveOptions {
    pub fn new(target_width: u32, target_height: u32) -> Self {
        CarveOptions {
            target_width,
            target_height,
            strategy: Strategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Seam carving only shrinks, and never below one pixel.
    pub fn validate(&self, width: u32, height: u32) -> Result<()> {
        let fits = |target: u32, current: u32| target >= 1 && target <= current;
        cq!(
            fits(self.target_width, width) && fits(self.target_height, height),
            Ok(()),
            Err(CarveError::TargetOutOfRange {
                target_width: self.target_width,
                target_height: self.target_height,
                width,
                height,
            })
        )
    }
}

// A seam found on the current energy map, with its cost.
struct Candidate {
    orientation: Orientation,
    seam: Seam,
    energy: f32,
}

/// A carver built around one seam finder.  It holds nothing between
/// calls but the finder; every step recomputes the energy map, since
/// removing a seam changes who neighbors whom.
pub struct SeamCarver<F: SeamFinder> {
    finder: F,
}

impl<F: SeamFinder> SeamCarver<F> {
    /// Creates a new SeamCarver around a seam finder.
    pub fn new(finder: F) -> Self {
        Self { finder }
    }

    pub fn finder(&self) -> &F {
        &self.finder
    }

    fn candidate(&self, energy: &Grid<f32>, orientation: Orientation) -> Candidate {
        let seam = self.finder.find_seam(energy, orientation);
        Candidate {
            orientation,
            energy: seam_energy(energy, &seam, orientation),
            seam,
        }
    }

    // Of the orientations allowed, find each one's seam on a single
    // energy map and return the cheaper.  A disallowed orientation is
    // never searched; on equal cost the horizontal seam wins.
    fn cheapest(
        &self,
        buffer: &PixelBuffer,
        vertical: bool,
        horizontal: bool,
    ) -> Option<Candidate> {
        let energy = compute_energy(buffer);
        let v = cq!(vertical, Some(self.candidate(&energy, Orientation::Vertical)), None);
        let h = cq!(horizontal, Some(self.candidate(&energy, Orientation::Horizontal)), None);
        let v_energy = v.as_ref().map_or(f32::INFINITY, |c| c.energy);
        let h_energy = h.as_ref().map_or(f32::INFINITY, |c| c.energy);
        cq!(v_energy < h_energy, v, h.or(v))
    }

    /// Find and remove one seam of the given orientation.
    pub fn carve_seam(&self, buffer: &mut PixelBuffer, orientation: Orientation) -> Result<()> {
        let candidate = self.candidate(&compute_energy(buffer), orientation);
        remove_seam(buffer, &candidate.seam, candidate.orientation)
    }

    /// Remove whichever single seam, vertical or horizontal, has the
    /// lower total energy.  Returns the orientation removed.
    pub fn remove_lowest_seam(&self, buffer: &mut PixelBuffer) -> Result<Orientation> {
        let (width, height) = buffer.dimensions();
        match self.cheapest(buffer, width > 1, height > 1) {
            Some(c) => {
                remove_seam(buffer, &c.seam, c.orientation)?;
                Ok(c.orientation)
            }
            None => Err(CarveError::TooSmall {
                orientation: Orientation::Vertical,
                size: width,
            }),
        }
    }

    /// One step toward the target: remove the cheaper of the seams
    /// that still need removing.  Returns `None`, and leaves the
    /// buffer alone, once the image is at its target size.
    pub fn carve_once(
        &self,
        buffer: &mut PixelBuffer,
        target_width: u32,
        target_height: u32,
    ) -> Result<Option<Orientation>> {
        let (width, height) = buffer.dimensions();
        let chosen = self.cheapest(buffer, width > target_width, height > target_height);
        match chosen {
            Some(c) => {
                debug!(
                    "{}: {} seam, energy {}, from {}x{}",
                    self.finder.name(),
                    c.orientation,
                    c.energy,
                    width,
                    height
                );
                remove_seam(buffer, &c.seam, c.orientation)?;
                Ok(Some(c.orientation))
            }
            None => Ok(None),
        }
    }

    /// Given an image and a desired new width and height, repeatedly
    /// carve seams out of the image.  Returns the number of seams
    /// removed; zero if the image is already the requested size.
    pub fn carve(
        &self,
        buffer: &mut PixelBuffer,
        target_width: u32,
        target_height: u32,
    ) -> Result<usize> {
        let (width, height) = buffer.dimensions();
        CarveOptions::new(target_width, target_height).validate(width, height)?;

        let mut removed = 0;
        while self
            .carve_once(buffer, target_width, target_height)?
            .is_some()
        {
            removed += 1;
        }
        info!(
            "carved {} seam(s) with {}, final size {}x{}",
            removed,
            self.finder.name(),
            buffer.width(),
            buffer.height()
        );
        Ok(removed)
    }
}

/// Carve `buffer` down to the size and with the strategy named in
/// `options`.  Returns the number of seams removed.
pub fn seamcarve(buffer: &mut PixelBuffer, options: &CarveOptions) -> Result<usize> {
    SeamCarver::new(options.strategy).carve(buffer, options.target_width, options.target_height)
}
