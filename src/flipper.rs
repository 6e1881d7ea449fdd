// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Grid dimensional flipper
//!
//! A utility proxy for the `GridView` trait that maps the width to the
//! original height, and vice versa, as well as every x to y and vice
//! versa.
//!
//! Seam finders are written once, for top-to-bottom seams.  Handing
//! them a flipped energy map makes every column of the original read
//! as a row, and the "vertical" seam they return is the original's
//! left-to-right seam: element `i` is the y coordinate in column `i`.
//! The left/right neighbor order of the vertical search becomes the
//! up/down order of the horizontal one.

use crate::grid::GridView;

pub struct Flipper<'a, V: ?Sized> {
    pub view: &'a V,
}

impl<'a, V: ?Sized> Flipper<'a, V> {
    pub fn new(view: &'a V) -> Self {
        Flipper { view }
    }
}

impl<'a, P, V> GridView<P> for Flipper<'a, V>
where
    P: Copy,
    V: GridView<P> + ?Sized,
{
    fn width(&self) -> u32 {
        self.view.height()
    }

    fn height(&self) -> u32 {
        self.view.width()
    }

    fn get(&self, x: u32, y: u32) -> P {
        self.view.get(y, x)
    }
}
