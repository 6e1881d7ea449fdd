// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! Given an image, calculate the energy map: the dual-gradient
//! magnitude of every pixel.  Neighbor lookups at the border clamp to
//! the edge pixel, so border pixels get an honest, if one-sided,
//! gradient.  Also here: summing the energy along a seam, and
//! rendering an energy map as a greyscale picture.

use crate::cq;
use crate::flipper::Flipper;
use crate::grid::{Grid, GridView};
use crate::pixelbuffer::PixelBuffer;
use crate::seamfinder::Orientation;
use image::{GrayImage, Luma, Pixel, Primitive};
use itertools::iproduct;
use num_traits::NumCast;

// Takes the channels (R,G,B) from two pixels and maps the difference
// between each channel, squares it, and then sums them all up.  This
// is the rusty expression of:
//
//        |Δx|² = (Δrx)²+(Δgx)²+(Δbx)²
//        |Δy|² = (Δry)²+(Δgy)²+(Δby)²
//       e(x,y) = sqrt(|Δx|²+|Δy|²)
//
// Alpha never enters into it; callers pass the RGB channels only.
fn squared_distance<S>(p1: &[S], p2: &[S]) -> f32
where
    S: Primitive + 'static,
{
    p1.iter()
        .zip(p2)
        .map(|(c1, c2)| {
            let c1s = <f32 as NumCast>::from(*c1).unwrap_or_default();
            let c2s = <f32 as NumCast>::from(*c2).unwrap_or_default();
            (c1s - c2s).powi(2)
        })
        .sum()
}

/// Compute the energy of every pixel in an image.  The result has
/// the image's dimensions and is never modified afterward.
pub fn compute_energy(buffer: &PixelBuffer) -> Grid<f32> {
    let (width, height) = buffer.dimensions();
    let rgb = |x: i64, y: i64| buffer.pixel(x, y).to_rgb();

    // NumCast is in scope, so spell out which `from` is meant.
    let (rows, cols) = (<i64 as From<u32>>::from(height), <i64 as From<u32>>::from(width));
    let energy = iproduct!(0..rows, 0..cols)
        .map(|(y, x)| {
            let (left, right) = (rgb(x - 1, y), rgb(x + 1, y));
            let (up, down) = (rgb(x, y - 1), rgb(x, y + 1));
            (squared_distance(left.channels(), right.channels())
                + squared_distance(up.channels(), down.channels()))
            .sqrt()
        })
        .collect();

    // iproduct! visits exactly width * height cells.
    Grid::from_vec(width, height, energy).unwrap_or_else(|| Grid::new(width, height))
}

// Sum the energy under a top-to-bottom seam of `view`.  Horizontal
// seams come through here by way of the Flipper.
fn energy_under_seam<V: GridView<f32> + ?Sized>(view: &V, seam: &[u32]) -> f32 {
    debug_assert_eq!(seam.len(), view.height() as usize, "seam length");
    seam.iter()
        .enumerate()
        .map(|(y, &x)| view.get(x, y as u32))
        .sum()
}

/// The total energy along a vertical seam.  Defined for any seam of
/// `energy.height()` in-range offsets.
pub fn vertical_seam_energy(energy: &Grid<f32>, seam: &[u32]) -> f32 {
    energy_under_seam(energy, seam)
}

/// The total energy along a horizontal seam.  Defined for any seam of
/// `energy.width()` in-range offsets.
pub fn horizontal_seam_energy(energy: &Grid<f32>, seam: &[u32]) -> f32 {
    energy_under_seam(&Flipper::new(energy), seam)
}

/// The total energy along a seam of either orientation.
pub fn seam_energy(energy: &Grid<f32>, seam: &[u32], orientation: Orientation) -> f32 {
    match orientation {
        Orientation::Vertical => vertical_seam_energy(energy, seam),
        Orientation::Horizontal => horizontal_seam_energy(energy, seam),
    }
}

/// Render an energy map as a greyscale image, scaled so the most
/// energetic pixel is white.  A flat map renders black.
pub fn energy_to_image(energy: &Grid<f32>) -> GrayImage {
    let (width, height) = energy.dimensions();
    let factor = energy.as_slice().iter().cloned().fold(0.0f32, f32::max);
    GrayImage::from_fn(width, height, |x, y| {
        let scaled = cq!(factor > 0.0, energy[(x, y)] / factor * 255.0, 0.0);
        Luma([scaled.round().max(0.0).min(255.0) as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn strip(width: u32, height: u32, pixels: &[[u8; 4]]) -> PixelBuffer {
        PixelBuffer::from_pixels(width, height, pixels.iter().map(|p| Rgba(*p)).collect()).unwrap()
    }

    #[test]
    fn horizontal_gradient_clamps_at_the_edges() {
        let image = strip(3, 1, &[[0, 0, 0, 255], [10, 0, 0, 255], [20, 0, 0, 255]]);
        let energy = compute_energy(&image);
        assert_eq!(energy.as_slice(), &[10.0, 20.0, 10.0]);
    }

    #[test]
    fn vertical_gradient_clamps_at_the_edges() {
        let image = strip(1, 3, &[[0, 0, 0, 255], [0, 30, 0, 255], [0, 60, 0, 255]]);
        let energy = compute_energy(&image);
        assert_eq!(energy.as_slice(), &[30.0, 60.0, 30.0]);
    }

    #[test]
    fn alpha_is_ignored() {
        let opaque = strip(3, 1, &[[0, 0, 0, 255], [10, 0, 0, 255], [20, 0, 0, 255]]);
        let ghostly = strip(3, 1, &[[0, 0, 0, 0], [10, 0, 0, 128], [20, 0, 0, 255]]);
        assert_eq!(compute_energy(&opaque), compute_energy(&ghostly));
    }

    #[test]
    fn gradients_combine_both_axes() {
        // Center pixel of a 3x3: left/right differ by 3 in red, up/down
        // by 4 in blue, for an energy of 5.
        let mut pixels = [[0u8, 0, 0, 255]; 9];
        pixels[5] = [3, 0, 0, 255];
        pixels[7] = [0, 0, 4, 255];
        let energy = compute_energy(&strip(3, 3, &pixels));
        assert_eq!(energy[(1, 1)], 5.0);
    }

    #[test]
    fn flat_images_have_no_energy() {
        let image = PixelBuffer::filled(4, 3, Rgba([7, 7, 7, 255])).unwrap();
        assert!(compute_energy(&image).as_slice().iter().all(|&e| e == 0.0));
    }

    #[test]
    fn seam_energies_sum_along_the_seam() {
        let energy = Grid::from_vec(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(vertical_seam_energy(&energy, &[2, 1]), 8.0);
        assert_eq!(horizontal_seam_energy(&energy, &[0, 1, 1]), 12.0);
        assert_eq!(seam_energy(&energy, &[0, 1, 1], Orientation::Horizontal), 12.0);
    }

    #[test]
    fn energy_of_pixels_at_the_border() {
        // A 2x1 strip: both clamped horizontal neighbors are the two
        // pixels themselves, and up/down clamp onto the pixel itself.
        let mut buffer = PixelBuffer::filled(2, 1, Rgba([0, 0, 0, 255])).unwrap();
        buffer.put_pixel(1, 0, Rgba([3, 4, 0, 255]));
        let energy = compute_energy(&buffer);
        assert_eq!(energy.dimensions(), (2, 1));
        assert_eq!(energy.as_slice(), &[5.0, 5.0]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "seam length")]
    fn short_seams_are_caught_in_debug_builds() {
        let energy = Grid::filled(3, 3, 1.0f32);
        vertical_seam_energy(&energy, &[0, 1]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "seam length")]
    fn long_horizontal_seams_are_caught_in_debug_builds() {
        let energy = Grid::filled(2, 3, 1.0f32);
        horizontal_seam_energy(&energy, &[0, 1, 1]);
    }

    #[test]
    fn energy_images_scale_to_white() {
        let energy = Grid::from_vec(2, 1, vec![0.0, 8.0]).unwrap();
        let picture = energy_to_image(&energy);
        assert_eq!(picture.get_pixel(0, 0), &Luma([0]));
        assert_eq!(picture.get_pixel(1, 0), &Luma([255]));
        let flat = energy_to_image(&Grid::new(2, 2));
        assert!(flat.pixels().all(|p| p.0[0] == 0));
    }
}
