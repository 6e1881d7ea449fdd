// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! How we ask for seams.
//!
//! A seam is a `Vec<u32>` of offsets.  For a vertical (top-to-bottom)
//! seam there is one x coordinate per row; for a horizontal
//! (left-to-right) seam there is one y coordinate per column.
//! Neighboring offsets never differ by more than one.

use crate::dynamic::DynamicSeams;
use crate::error::CarveError;
use crate::greedy::GreedySeams;
use crate::grid::Grid;
use std::fmt;
use std::str::FromStr;

/// One seam's worth of offsets.
pub type Seam = Vec<u32>;

/// Which way a seam runs.  A vertical seam narrows the image; a
/// horizontal seam shortens it.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Orientation {
    /// The number of offsets a seam of this orientation needs for an
    /// image of the given dimensions.
    pub fn seam_length(self, width: u32, height: u32) -> usize {
        match self {
            Orientation::Vertical => height as usize,
            Orientation::Horizontal => width as usize,
        }
    }

    /// The dimension a seam of this orientation removes from.
    pub fn span(self, width: u32, height: u32) -> u32 {
        match self {
            Orientation::Vertical => width,
            Orientation::Horizontal => height,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Orientation::Vertical => "vertical",
            Orientation::Horizontal => "horizontal",
        })
    }
}

/// True if every pair of adjacent offsets differs by at most one.
pub fn is_connected(seam: &[u32]) -> bool {
    seam.windows(2)
        .all(|pair| (i64::from(pair[0]) - i64::from(pair[1])).abs() <= 1)
}

/// This trait defines how we will return seams from an energy map.
/// It's a primitive interface, just enough to make room for multiple
/// seam finders behind one carver.
pub trait SeamFinder {
    /// A short human-readable name for reports.
    fn name(&self) -> &'static str;

    /// Request a top-to-bottom seam: `energy.height()` x coordinates.
    fn find_vertical_seam(&self, energy: &Grid<f32>) -> Seam;

    /// Request a left-to-right seam: `energy.width()` y coordinates.
    fn find_horizontal_seam(&self, energy: &Grid<f32>) -> Seam;

    /// Approximate auxiliary storage, in bytes, a search over a
    /// `width` × `height` map costs.  This is the order of growth of
    /// the finder's working set, not a live measurement.
    fn auxiliary_bytes(&self, width: u32, height: u32, orientation: Orientation) -> usize;

    fn find_seam(&self, energy: &Grid<f32>, orientation: Orientation) -> Seam {
        match orientation {
            Orientation::Vertical => self.find_vertical_seam(energy),
            Orientation::Horizontal => self.find_horizontal_seam(energy),
        }
    }
}

/// The two interchangeable seam finders, as a configuration value.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Strategy {
    /// The globally optimal cumulative-cost search.
    #[default]
    DynamicProgramming,
    /// The cheap, myopic, three-neighbor walk.
    Greedy,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::DynamicProgramming, Strategy::Greedy];

    fn finder(self) -> &'static dyn SeamFinder {
        match self {
            Strategy::DynamicProgramming => &DynamicSeams,
            Strategy::Greedy => &GreedySeams,
        }
    }
}

impl SeamFinder for Strategy {
    fn name(&self) -> &'static str {
        self.finder().name()
    }

    fn find_vertical_seam(&self, energy: &Grid<f32>) -> Seam {
        self.finder().find_vertical_seam(energy)
    }

    fn find_horizontal_seam(&self, energy: &Grid<f32>) -> Seam {
        self.finder().find_horizontal_seam(energy)
    }

    fn auxiliary_bytes(&self, width: u32, height: u32, orientation: Orientation) -> usize {
        self.finder().auxiliary_bytes(width, height, orientation)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::DynamicProgramming => "dp",
            Strategy::Greedy => "greedy",
        })
    }
}

impl FromStr for Strategy {
    type Err = CarveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dp" | "dynamic" | "optimal" => Ok(Strategy::DynamicProgramming),
            "greedy" => Ok(Strategy::Greedy),
            other => Err(CarveError::UnknownStrategy(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectivity() {
        assert!(is_connected(&[]));
        assert!(is_connected(&[4]));
        assert!(is_connected(&[0, 1, 2, 2, 1]));
        assert!(!is_connected(&[0, 2]));
        assert!(!is_connected(&[3, 3, 1]));
    }

    #[test]
    fn strategies_parse_and_print() {
        assert_eq!("dp".parse::<Strategy>().unwrap(), Strategy::DynamicProgramming);
        assert_eq!(" Greedy ".parse::<Strategy>().unwrap(), Strategy::Greedy);
        assert!(matches!(
            "astar".parse::<Strategy>(),
            Err(CarveError::UnknownStrategy(_))
        ));
        for strategy in Strategy::ALL.iter() {
            assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), *strategy);
        }
    }

    #[test]
    fn the_optimal_search_is_the_default() {
        assert_eq!(Strategy::default(), Strategy::DynamicProgramming);
        assert_eq!(Strategy::default().name(), "Dynamic Prog.");
    }

    #[test]
    fn seam_lengths_follow_orientation() {
        assert_eq!(Orientation::Vertical.seam_length(5, 4), 4);
        assert_eq!(Orientation::Horizontal.seam_length(5, 4), 5);
        assert_eq!(Orientation::Vertical.span(5, 4), 5);
        assert_eq!(Orientation::Horizontal.span(5, 4), 4);
    }
}
