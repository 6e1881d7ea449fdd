// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Measuring the seam finders against each other.
//!
//! Timing, seam energy and an estimate of working memory for each
//! strategy; how far apart two seams wander; and how many seams an
//! m × n grid admits at all, which is why nobody enumerates them.

use crate::cq;
use crate::energy::seam_energy;
use crate::error::{CarveError, Result};
use crate::grid::{Grid, GridView};
use crate::seamfinder::{Orientation, Seam, SeamFinder, Strategy};
use itertools::Itertools;
use log::warn;
use std::fmt;
use std::time::Instant;

/// Exact counts are only attempted up to this many rows; past it the
/// count no longer fits in a `u64` for any useful width.
pub const MAX_EXACT_ROWS: usize = 20;

/// What one seam search cost and what it found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceMetrics {
    /// Wall-clock time of the search alone, in milliseconds.
    pub computation_time_ms: f64,
    /// Total energy under the seam found.
    pub seam_energy: f32,
    /// Approximate auxiliary storage of the search, in bytes.
    pub memory_bytes: usize,
}

/// Run one seam search and time it.
pub fn measure<F: SeamFinder + ?Sized>(
    finder: &F,
    energy: &Grid<f32>,
    orientation: Orientation,
) -> (Seam, PerformanceMetrics) {
    let start = Instant::now();
    let seam = finder.find_seam(energy, orientation);
    let elapsed = start.elapsed();

    let (width, height) = energy.dimensions();
    let metrics = PerformanceMetrics {
        computation_time_ms: elapsed.as_secs_f64() * 1000.0,
        seam_energy: seam_energy(energy, &seam, orientation),
        memory_bytes: finder.auxiliary_bytes(width, height, orientation),
    };
    (seam, metrics)
}

/// How two seams of the same length differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeamDivergence {
    /// Number of offsets compared.
    pub positions: usize,
    /// Number of positions at which the seams disagree.
    pub differing: usize,
    /// Largest disagreement at any one position.
    pub max_offset: u32,
}

impl SeamDivergence {
    pub fn identical(&self) -> bool {
        self.differing == 0
    }

    /// Share of positions that differ, in percent.
    pub fn differing_percent(&self) -> f64 {
        if self.positions == 0 {
            return 0.0;
        }
        100.0 * self.differing as f64 / self.positions as f64
    }
}

impl fmt::Display for SeamDivergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total positions: {}", self.positions)?;
        writeln!(
            f,
            "Different positions: {} ({:.2}%)",
            self.differing,
            self.differing_percent()
        )?;
        writeln!(f, "Maximum pixel difference: {}", self.max_offset)?;
        write!(
            f,
            "The seams are {}.",
            if self.identical() { "IDENTICAL" } else { "DIFFERENT" }
        )
    }
}

/// Compare two seams position by position.  Seams of different
/// lengths describe different images and are not comparable.
pub fn compare_seams(left: &[u32], right: &[u32]) -> Result<SeamDivergence> {
    if left.len() != right.len() {
        warn!(
            "seams have different sizes ({} and {}), cannot compare",
            left.len(),
            right.len()
        );
        return Err(CarveError::SeamMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    let (differing, max_offset) = left
        .iter()
        .zip(right)
        .map(|(&a, &b)| cq!(a > b, a - b, b - a))
        .filter(|&d| d > 0)
        .fold((0usize, 0u32), |(count, max), d| (count + 1, max.max(d)));
    Ok(SeamDivergence {
        positions: left.len(),
        differing,
        max_offset,
    })
}

/// Both strategies run on the same energy map, side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct SeamAnalysis {
    pub orientation: Orientation,
    pub optimal_seam: Seam,
    pub greedy_seam: Seam,
    pub table: ComparisonTable,
    pub divergence: SeamDivergence,
}

/// Find a seam of the given orientation with each strategy, time both,
/// and compare the results.
pub fn analyze(energy: &Grid<f32>, orientation: Orientation) -> Result<SeamAnalysis> {
    let (optimal_seam, optimal) = measure(&Strategy::DynamicProgramming, energy, orientation);
    let (greedy_seam, greedy) = measure(&Strategy::Greedy, energy, orientation);
    let divergence = compare_seams(&optimal_seam, &greedy_seam)?;
    Ok(SeamAnalysis {
        orientation,
        optimal_seam,
        greedy_seam,
        table: ComparisonTable {
            label: format!("{} seam", orientation),
            optimal,
            greedy,
        },
        divergence,
    })
}

/// The two strategies' metrics for one kind of seam, ready to print.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonTable {
    pub label: String,
    pub optimal: PerformanceMetrics,
    pub greedy: PerformanceMetrics,
}

impl ComparisonTable {
    /// How much more energy the greedy seam carries than the optimal
    /// one, in percent.  Zero when the optimal seam is free.
    pub fn energy_excess_percent(&self) -> f64 {
        let optimal = f64::from(self.optimal.seam_energy);
        let greedy = f64::from(self.greedy.seam_energy);
        cq!(optimal > 0.0, (greedy - optimal) / optimal * 100.0, 0.0)
    }

    /// How many times faster the greedy search ran.
    pub fn speedup(&self) -> f64 {
        let greedy = self.greedy.computation_time_ms;
        cq!(
            greedy > 0.0,
            self.optimal.computation_time_ms / greedy,
            f64::INFINITY
        )
    }

    /// How much less memory the greedy search needs, in percent.
    pub fn memory_reduction_percent(&self) -> f64 {
        let optimal = self.optimal.memory_bytes as f64;
        let greedy = self.greedy.memory_bytes as f64;
        cq!(optimal > 0.0, (optimal - greedy) / optimal * 100.0, 0.0)
    }
}

impl fmt::Display for ComparisonTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "+------------------+------------------+------------------+";
        writeln!(f, "=== Performance Comparison: {} ===", self.label)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "| {:<16} | {:<16} | {:<16} |", "Metric", "Dynamic Prog.", "Greedy")?;
        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            "| {:<16} | {:>16.4} | {:>16.4} |",
            "Time (ms)", self.optimal.computation_time_ms, self.greedy.computation_time_ms
        )?;
        writeln!(
            f,
            "| {:<16} | {:>16.4} | {:>16.4} |",
            "Seam Energy", self.optimal.seam_energy, self.greedy.seam_energy
        )?;
        writeln!(
            f,
            "| {:<16} | {:>16} | {:>16} |",
            "Memory (bytes)", self.optimal.memory_bytes, self.greedy.memory_bytes
        )?;
        writeln!(f, "{}", rule)?;

        let excess = self.energy_excess_percent();
        let speedup = self.speedup();
        writeln!(f, "- DP finds the optimal (minimum energy) seam")?;
        writeln!(
            f,
            "- Greedy seam has {:.2}% {} energy than DP",
            excess.abs(),
            if excess > 0.0 { "MORE" } else { "LESS" }
        )?;
        writeln!(
            f,
            "- Greedy is {:.2}x {} than DP",
            speedup,
            if speedup > 1.0 { "faster" } else { "slower" }
        )?;
        write!(
            f,
            "- Greedy uses {:.2}% less memory",
            self.memory_reduction_percent()
        )
    }
}

/// The exact number of distinct top-to-bottom seams in a grid of
/// `rows` × `cols`: every start column, then at each row a step
/// down-left, down, or down-right that stays on the grid.
///
/// Returns zero for an empty grid, and refuses (returns zero, with a
/// warning) above `MAX_EXACT_ROWS` rows, where the count overflows;
/// use `estimate_possible_seams_log` there.
pub fn count_possible_seams(rows: usize, cols: usize) -> u64 {
    if rows == 0 || cols == 0 {
        return 0;
    }
    if rows > MAX_EXACT_ROWS {
        warn!(
            "{} rows would overflow an exact seam count, use the logarithmic estimate",
            rows
        );
        return 0;
    }

    // Seams ending at each column of the current row.
    let first = vec![1u64; cols];
    let last = (1..rows).fold(first, |above, _| {
        (0..cols)
            .map(|j| {
                let left = cq!(j > 0, above[j - 1], 0);
                let right = cq!(j + 1 < cols, above[j + 1], 0);
                left + above[j] + right
            })
            .collect()
    });
    last.iter().sum()
}

// log10(Σ 10^t) without leaving log space: factor out the largest
// term so every power is at most one.
fn log10_sum_exp(terms: &[f64]) -> f64 {
    let max = terms.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return max;
    }
    let sum: f64 = terms.iter().map(|t| 10f64.powf(t - max)).sum();
    max + sum.log10()
}

/// The base-10 logarithm of `count_possible_seams(rows, cols)`,
/// computed entirely in log space so it never overflows.  Returns
/// zero for an empty grid.
pub fn estimate_possible_seams_log(rows: usize, cols: usize) -> f64 {
    if rows == 0 || cols == 0 {
        return 0.0;
    }

    let first = vec![0.0f64; cols];
    let last = (1..rows).fold(first, |above, _| {
        (0..cols)
            .map(|j| {
                let lo = j.saturating_sub(1);
                let hi = (j + 1).min(cols - 1);
                log10_sum_exp(&above[lo..=hi])
            })
            .collect::<Vec<f64>>()
    });
    log10_sum_exp(&last)
}

/// log10 of the 2^(m-1) lower bound on the number of seams in an
/// m-row grid at least two columns wide.
pub fn lower_bound_log(rows: usize) -> f64 {
    rows.saturating_sub(1) as f64 * 2f64.log10()
}

/// One row of the growth table: exact while it fits, logarithmic
/// after.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeamCount {
    Exact(u64),
    Log10(f64),
}

impl fmt::Display for SeamCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeamCount::Exact(n) => write!(f, "{} seams", n),
            SeamCount::Log10(l) => write!(f, "~10^{:.4} seams", l),
        }
    }
}

/// The number of seams for m = 2, 4, 6, … up to `min(25, rows)`, in a
/// grid `cols` wide.  Shows the exponential growth in m.
pub fn growth_table(rows: usize, cols: usize) -> Vec<(usize, SeamCount)> {
    (2..=rows.min(25))
        .step_by(2)
        .map(|m| {
            let count = cq!(
                m <= MAX_EXACT_ROWS,
                SeamCount::Exact(count_possible_seams(m, cols)),
                SeamCount::Log10(estimate_possible_seams_log(m, cols))
            );
            (m, count)
        })
        .collect_vec()
}
