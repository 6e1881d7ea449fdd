// #![deny(missing_docs)]

//! Content-aware image shrinking by seam carving.
//!
//! An energy map scores every pixel by its color gradient; a seam
//! finder picks a connected top-to-bottom (or left-to-right) path of
//! low-energy pixels; removing that path narrows (or shortens) the
//! image by one.  Two finders are provided: an optimal dynamic
//! programming search and a cheap greedy walk, plus the tools to
//! measure one against the other.

pub mod ternary;

pub mod analysis;
pub mod dynamic;
pub mod energy;
pub mod error;
pub mod flipper;
pub mod greedy;
pub mod grid;
pub mod pixelbuffer;
pub mod seamcarver;
pub mod seamfinder;

pub use analysis::{
    analyze, compare_seams, count_possible_seams, estimate_possible_seams_log, measure,
    PerformanceMetrics, SeamDivergence,
};
pub use dynamic::DynamicSeams;
pub use energy::{compute_energy, horizontal_seam_energy, vertical_seam_energy};
pub use error::{CarveError, Result};
pub use greedy::GreedySeams;
pub use grid::{Grid, GridView};
pub use pixelbuffer::{Pixel, PixelBuffer};
pub use seamcarver::{
    remove_horizontal_seam, remove_vertical_seam, seamcarve, CarveOptions, SeamCarver,
};
pub use seamfinder::{Orientation, Seam, SeamFinder, Strategy};
