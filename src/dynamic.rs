// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The optimal seam finder.
//!
//! Builds a table of the cheapest way to reach every cell from the top
//! row, then walks back up from the cheapest cell in the bottom row.
//! The result is the minimum-energy seam among all connected,
//! unit-step paths.  Costs O(width·height) time and the same again in
//! auxiliary memory for the table, which is thrown away on return.
//!
//! Unlike energy lookups, the table does *not* clamp: a neighbor off
//! the edge of the map is unreachable and costs infinity.  Clamping
//! it would count the edge column twice and bias seams toward it.

use crate::cq;
use crate::flipper::Flipper;
use crate::grid::{Grid, GridView};
use crate::seamfinder::{Orientation, Seam, SeamFinder};
use std::mem::size_of;

// The costs of the three cells above `x` in row `y` of the table,
// listed in tie-break order: straight up, then left, then right.
// Cells off the map come back as infinity.
fn parents(cumulative: &Grid<f32>, x: u32, y: u32) -> [(u32, f32); 3] {
    let width = cumulative.width();
    let cost = |px: i64| {
        cumulative
            .get_checked(px, i64::from(y))
            .unwrap_or(f32::INFINITY)
    };
    let x = i64::from(x);
    [
        (x as u32, cost(x)),
        (cq!(x == 0, 0, x - 1) as u32, cost(x - 1)),
        (cq!(x + 1 >= i64::from(width), x, x + 1) as u32, cost(x + 1)),
    ]
}

// First-seen wins, so the order `parents` lists them in is the
// tie-break order.
fn cheapest(candidates: &[(u32, f32)]) -> (u32, f32) {
    candidates.iter().skip(1).fold(candidates[0], |best, &next| {
        cq!(next.1 < best.1, next, best)
    })
}

/// Fill the cumulative-cost table for top-to-bottom seams of `energy`.
/// Each cell holds the least total energy of any seam from the top
/// row down to and including that cell.
pub fn cumulative_energy<V: GridView<f32> + ?Sized>(energy: &V) -> Grid<f32> {
    let (width, height) = energy.dimensions();
    let mut table: Grid<f32> = Grid::new(width, height);
    if width == 0 || height == 0 {
        return table;
    }

    // Populate the first row with their native energies.
    for x in 0..width {
        table[(x, 0)] = energy.get(x, 0);
    }

    // For every subsequent row, each cell costs its own energy plus
    // the cheapest of the (up to) three cells above it.
    for y in 1..height {
        for x in 0..width {
            let (_, above) = cheapest(&parents(&table, x, y - 1));
            table[(x, y)] = energy.get(x, y) + above;
        }
    }
    table
}

/// Given an energy map, return the list of x-coordinates that, when
/// mapped with the range (0..height), give the XY coordinates for
/// each pixel in the least-energy top-to-bottom seam.
pub fn energy_to_seam<V: GridView<f32> + ?Sized>(energy: &V) -> Seam {
    let (width, height) = energy.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let table = cumulative_energy(energy);

    // Find the x coordinate of the bottommost seam with the least
    // energy; the leftmost wins a tie.
    let bottom = table.row(height - 1);
    let mut seam_col = (0..width)
        .min_by(|&a, &b| bottom[a as usize].total_cmp(&bottom[b as usize]))
        .unwrap_or(0);

    // Working backwards, generate a vec of x coordinates that map to
    // the seam, reverse and return.
    let mut seam = Vec::with_capacity(height as usize);
    seam.push(seam_col);
    for y in (0..height - 1).rev() {
        seam_col = cheapest(&parents(&table, seam_col, y)).0;
        seam.push(seam_col);
    }
    seam.reverse();
    seam
}

/// The optimal seam finder.
#[derive(Debug, Default, Copy, Clone)]
pub struct DynamicSeams;

impl SeamFinder for DynamicSeams {
    fn name(&self) -> &'static str {
        "Dynamic Prog."
    }

    fn find_vertical_seam(&self, energy: &Grid<f32>) -> Seam {
        energy_to_seam(energy)
    }

    fn find_horizontal_seam(&self, energy: &Grid<f32>) -> Seam {
        energy_to_seam(&Flipper::new(energy))
    }

    // The whole cumulative table, whichever way the seam runs.
    fn auxiliary_bytes(&self, width: u32, height: u32, _orientation: Orientation) -> usize {
        width as usize * height as usize * size_of::<f32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::{horizontal_seam_energy, vertical_seam_energy};

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
    fn cumulative_table_takes_cheapest_parent() {
        let table = cumulative_energy(&energies());
        assert_eq!(table.row(0), &[9., 9., 0., 9., 9.]);
        assert_eq!(table.row(1), &[18., 1., 9., 8., 18.]);
        assert_eq!(table.row(2), &[10., 10., 10., 17., 8.]);
        assert_eq!(table.row(3), &[19., 19., 19., 8., 17.]);
    }

    #[test]
    fn energy_grid_to_vertical_seam() {
        let energy = energies();
        let seam = DynamicSeams.find_vertical_seam(&energy);
        assert_eq!(seam, [2, 3, 4, 3]);
        assert_eq!(vertical_seam_energy(&energy, &seam), 8.0);
    }

    #[test]
    fn energy_grid_to_horizontal_seam() {
        let energy = energies();
        let seam = DynamicSeams.find_horizontal_seam(&energy);
        assert_eq!(seam, [1, 1, 0, 1, 2]);
        assert_eq!(horizontal_seam_energy(&energy, &seam), 18.0);
    }

    #[test]
    fn uniform_grid_goes_straight_down() {
        let energy = Grid::filled(3, 3, 1.0f32);
        let seam = DynamicSeams.find_vertical_seam(&energy);
        assert_eq!(seam, [0, 0, 0]);
        assert_eq!(vertical_seam_energy(&energy, &seam), 3.0);
    }

    #[test]
    fn follows_a_zero_column() {
        let energy = Grid::from_vec(
            5,
            4,
            (0..20)
                .map(|i| cq!(i % 5 == 2, 0.0f32, 100.0))
                .collect(),
        )
        .unwrap();
        let seam = DynamicSeams.find_vertical_seam(&energy);
        assert_eq!(seam, [2, 2, 2, 2]);
        assert_eq!(vertical_seam_energy(&energy, &seam), 0.0);
    }

    #[test]
    fn off_map_parents_are_unreachable_not_clamped() {
        let energy = Grid::from_vec(2, 2, vec![0.0, 5.0, 1.0, 1.0]).unwrap();
        let table = cumulative_energy(&energy);
        assert_eq!(table.row(1), &[1.0, 1.0]);
        let leftmost = parents(&table, 0, 0);
        assert_eq!(leftmost[1].1, f32::INFINITY);
        let rightmost = parents(&table, 1, 0);
        assert_eq!(rightmost[2].1, f32::INFINITY);
    }

    #[test]
    fn backtrack_prefers_straight_then_left() {
        // Row 0 is flat, so every parent ties.  Straight wins.
        let energy = Grid::from_vec(3, 2, vec![1.0, 1.0, 1.0, 5.0, 0.0, 5.0]).unwrap();
        assert_eq!(DynamicSeams.find_vertical_seam(&energy), [1, 1]);
        // Left beats right when straight is dearer.
        let energy = Grid::from_vec(3, 2, vec![1.0, 9.0, 1.0, 5.0, 0.0, 5.0]).unwrap();
        assert_eq!(DynamicSeams.find_vertical_seam(&energy), [0, 1]);
    }

    #[test]
    fn single_column_and_single_row() {
        let column = Grid::from_vec(1, 3, vec![4.0, 2.0, 7.0]).unwrap();
        assert_eq!(DynamicSeams.find_vertical_seam(&column), [0, 0, 0]);
        assert_eq!(DynamicSeams.find_horizontal_seam(&column), [1]);
        let row = Grid::from_vec(3, 1, vec![4.0, 2.0, 7.0]).unwrap();
        assert_eq!(DynamicSeams.find_vertical_seam(&row), [1]);
        assert_eq!(DynamicSeams.find_horizontal_seam(&row), [0, 0, 0]);
    }

    #[test]
    fn memory_estimate_is_the_whole_table() {
        assert_eq!(
            DynamicSeams.auxiliary_bytes(5, 4, Orientation::Vertical),
            5 * 4 * size_of::<f32>()
        );
    }
}
