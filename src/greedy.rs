// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The greedy seam finder.
//!
//! Start at the cheapest pixel of the first row and, one row at a
//! time, step to whichever of the three pixels below is cheapest on
//! its own.  No table and no lookahead: the only storage is the seam
//! itself, and the result is frequently worse than the optimum.

use crate::cq;
use crate::flipper::Flipper;
use crate::grid::{Grid, GridView};
use crate::seamfinder::{Orientation, Seam, SeamFinder};
use std::mem::size_of;

/// Given an energy map, walk a top-to-bottom seam by always taking
/// the lowest-energy pixel among straight down, down-left and
/// down-right.  Ties go straight, then left, then right.
pub fn energy_to_seam<V: GridView<f32> + ?Sized>(energy: &V) -> Seam {
    let (width, height) = energy.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let maxwidth = width - 1;

    // The leftmost of the cheapest pixels in the top row.
    let start = (0..width)
        .min_by(|&a, &b| energy.get(a, 0).total_cmp(&energy.get(b, 0)))
        .unwrap_or(0);

    let mut seam = Vec::with_capacity(height as usize);
    seam.push(start);
    for y in 1..height {
        let x = seam[seam.len() - 1];
        let candidates = [
            Some(x),
            cq!(x > 0, Some(x - 1), None),
            cq!(x < maxwidth, Some(x + 1), None),
        ];
        let next = candidates.iter().flatten().fold(x, |best, &c| {
            cq!(energy.get(c, y) < energy.get(best, y), c, best)
        });
        seam.push(next);
    }
    seam
}

/// The greedy seam finder.
#[derive(Debug, Default, Copy, Clone)]
pub struct GreedySeams;

impl SeamFinder for GreedySeams {
    fn name(&self) -> &'static str {
        "Greedy"
    }

    fn find_vertical_seam(&self, energy: &Grid<f32>) -> Seam {
        energy_to_seam(energy)
    }

    fn find_horizontal_seam(&self, energy: &Grid<f32>) -> Seam {
        energy_to_seam(&Flipper::new(energy))
    }

    // Just the seam: one offset per row, or per column.
    fn auxiliary_bytes(&self, width: u32, height: u32, orientation: Orientation) -> usize {
        orientation.seam_length(width, height) * size_of::<u32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamic::DynamicSeams;
    use crate::energy::{horizontal_seam_energy, vertical_seam_energy};
    use crate::seamfinder::is_connected;

    const ENERGY_DATA: [f32; 20] = [
        9., 9., 0., 9., 9., //
        9., 1., 9., 8., 9., //
        9., 9., 9., 9., 0., //
        9., 9., 9., 0., 9.,
    ];

    fn energies() -> Grid<f32> {
        Grid::from_vec(5, 4, ENERGY_DATA.to_vec()).unwrap()
    }

    #[test]
    fn energy_grid_to_vertical_seam() {
        let energy = energies();
        let seam = GreedySeams.find_vertical_seam(&energy);
        assert_eq!(seam, [2, 1, 1, 1]);
        assert_eq!(vertical_seam_energy(&energy, &seam), 19.0);
        let optimal = DynamicSeams.find_vertical_seam(&energy);
        assert!(vertical_seam_energy(&energy, &optimal) < 19.0);
    }

    #[test]
    fn energy_grid_to_horizontal_seam() {
        let energy = energies();
        let seam = GreedySeams.find_horizontal_seam(&energy);
        // Column 0 is flat, so the walk starts at the top.
        assert_eq!(seam, [0, 1, 0, 1, 2]);
        assert!(is_connected(&seam));
        assert_eq!(horizontal_seam_energy(&energy, &seam), 18.0);
    }

    #[test]
    fn ties_go_straight_then_left() {
        let flat = Grid::from_vec(3, 2, vec![1.0, 0.0, 1.0, 2.0, 2.0, 2.0]).unwrap();
        assert_eq!(GreedySeams.find_vertical_seam(&flat), [1, 1]);
        let lopsided = Grid::from_vec(3, 2, vec![1.0, 0.0, 1.0, 1.0, 2.0, 1.0]).unwrap();
        assert_eq!(GreedySeams.find_vertical_seam(&lopsided), [1, 0]);
    }

    #[test]
    fn horizontal_ties_go_up_before_down() {
        // Column 0 starts the walk on row 1; in column 1 straight costs
        // more than either diagonal, and up and down tie.
        let tied = Grid::from_vec(2, 3, vec![5.0, 1.0, 0.0, 9.0, 5.0, 1.0]).unwrap();
        assert_eq!(GreedySeams.find_horizontal_seam(&tied), [1, 0]);
        let downhill = Grid::from_vec(2, 3, vec![5.0, 2.0, 0.0, 9.0, 5.0, 1.0]).unwrap();
        assert_eq!(GreedySeams.find_horizontal_seam(&downhill), [1, 2]);
    }

    #[test]
    fn stays_inside_the_edges() {
        let energy = Grid::from_vec(2, 3, vec![0.0, 5.0, 9.0, 9.0, 9.0, 0.0]).unwrap();
        let seam = GreedySeams.find_vertical_seam(&energy);
        assert_eq!(seam, [0, 0, 1]);
        assert!(seam.iter().all(|&x| x < 2));
    }

    #[test]
    fn memory_estimate_is_just_the_seam() {
        assert_eq!(
            GreedySeams.auxiliary_bytes(5, 4, Orientation::Vertical),
            4 * size_of::<u32>()
        );
        assert_eq!(
            GreedySeams.auxiliary_bytes(5, 4, Orientation::Horizontal),
            5 * size_of::<u32>()
        );
    }
}
