// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A fixed-size, dense, two-dimensional field.
//!
//! The same container holds pixels, per-pixel energies, and the
//! cumulative cost table of the dynamic-programming seam search.
//! Reads may be clamped to the nearest edge; writes outside the
//! field are dropped.

use crate::cq;
use std::ops::{Index, IndexMut};

/// Read-only access to a width × height field of values.  This is the
/// seam finders' view of an energy map; the `Flipper` implements it as
/// well, so a horizontal search is a vertical search on a transposed
/// view.
pub trait GridView<P: Copy> {
    /// Number of columns.
    fn width(&self) -> u32;

    /// Number of rows.
    fn height(&self) -> u32;

    /// The value at (x, y).  Callers must stay in bounds.
    fn get(&self, x: u32, y: u32) -> P;

    /// (width, height), as with `GenericImageView::dimensions`.
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }
}

/// Defines the basic two-dimensional map: an addressable field
/// containing the energy of each pixel, the cumulative cost of
/// reaching each cell, or the pixels themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<P: Copy> {
    width: u32,
    height: u32,
    cells: Vec<P>,
}

impl<P: Copy + Default> Grid<P> {
    /// Define a new grid with every cell set to the content type's
    /// default.
    pub fn new(width: u32, height: u32) -> Self {
        Grid::filled(width, height, P::default())
    }
}

impl<P: Copy> Grid<P> {
    /// Define a new grid with every cell set to `value`.
    pub fn filled(width: u32, height: u32, value: P) -> Self {
        Grid {
            width,
            height,
            cells: vec![value; width as usize * height as usize],
        }
    }

    /// Wrap an existing row-major vector.  Returns `None` if the
    /// vector's length does not equal `width * height`.
    pub fn from_vec(width: u32, height: u32, cells: Vec<P>) -> Option<Self> {
        if cells.len() != width as usize * height as usize {
            return None;
        }
        Some(Grid {
            width,
            height,
            cells,
        })
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.  This
    // particular variant is the same one used in image.rs.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    /// The value at (x, y), or `None` if the coordinate lies outside
    /// the grid.
    pub fn get_checked(&self, x: i64, y: i64) -> Option<P> {
        cq!(
            self.in_bounds(x, y),
            Some(self[(x as u32, y as u32)]),
            None
        )
    }

    /// The value at (x, y) with both coordinates saturated to the
    /// nearest valid row and column.  Panics only on an empty grid.
    pub fn clamped(&self, x: i64, y: i64) -> P {
        let cx = x.max(0).min(i64::from(self.width) - 1) as u32;
        let cy = y.max(0).min(i64::from(self.height) - 1) as u32;
        self[(cx, cy)]
    }

    /// Set the value at (x, y).  Out-of-bounds writes are ignored;
    /// the return value says whether the write landed.
    pub fn set(&mut self, x: i64, y: i64, value: P) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        self[(x as u32, y as u32)] = value;
        true
    }

    /// True if the grid has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cells, row-major.
    pub fn as_slice(&self) -> &[P] {
        &self.cells
    }

    /// Give up the cells, row-major.
    pub fn into_vec(self) -> Vec<P> {
        self.cells
    }

    /// One row of cells.
    pub fn row(&self, y: u32) -> &[P] {
        let start = self.get_index(0, y);
        &self.cells[start..start + self.width as usize]
    }
}

impl<P: Copy> GridView<P> for Grid<P> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn get(&self, x: u32, y: u32) -> P {
        self[(x, y)]
    }
}

impl<P: Copy> Index<(u32, u32)> for Grid<P> {
    type Output = P;

    /// A convenience addressing mode for getting values.
    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.cells[index]
    }
}

impl<P: Copy> IndexMut<(u32, u32)> for Grid<P> {
    /// A convenience addressing mode for setting values.
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.cells[index]
    }
}
