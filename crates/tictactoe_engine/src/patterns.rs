//! Geometric pattern catalog for the 3x3 board.
//!
//! The catalog is derived once from the board geometry and shared
//! immutably for the lifetime of the process. Iteration order is
//! canonical: rows, then columns, then diagonals, and every derived
//! collection preserves it.

use super::Space;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::{debug, instrument};

/// Three spaces forming a line.
pub type Pattern = [Space; 3];

/// Unordered pair of spaces that share a winning pattern.
///
/// The pair is stored smallest-first so `(a, b)` and `(b, a)` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartialPattern {
    low: Space,
    high: Space,
}

impl PartialPattern {
    /// Creates an unordered pair.
    pub fn new(a: Space, b: Space) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    /// Both spaces, smallest first.
    pub fn spaces(&self) -> [Space; 2] {
        [self.low, self.high]
    }

    /// True if `space` is one of the pair.
    pub fn contains(&self, space: Space) -> bool {
        self.low == space || self.high == space
    }
}

/// Static geometric data describing the winning lines and derived indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternCatalog {
    winning: Vec<Pattern>,
    partial: Vec<(PartialPattern, Space)>,
    corners: Vec<Space>,
    middles: Vec<Space>,
    outer: Vec<Pattern>,
    diagonal: Vec<Pattern>,
}

static CATALOG: LazyLock<PatternCatalog> = LazyLock::new(PatternCatalog::build);

/// Returns the process-wide pattern catalog.
pub fn catalog() -> &'static PatternCatalog {
    &CATALOG
}

impl PatternCatalog {
    /// Derives the catalog from the 3x3 geometry.
    #[instrument]
    pub fn build() -> Self {
        let at = |row: usize, col: usize| Space::ALL[row * 3 + col];

        let mut winning = Vec::with_capacity(8);
        for row in 0..3 {
            winning.push([at(row, 0), at(row, 1), at(row, 2)]);
        }
        for col in 0..3 {
            winning.push([at(0, col), at(1, col), at(2, col)]);
        }
        winning.push([at(0, 0), at(1, 1), at(2, 2)]);
        winning.push([at(0, 2), at(1, 1), at(2, 0)]);

        let mut partial = Vec::with_capacity(winning.len() * 3);
        for &[s1, s2, s3] in &winning {
            partial.push((PartialPattern::new(s1, s2), s3));
            partial.push((PartialPattern::new(s1, s3), s2));
            partial.push((PartialPattern::new(s2, s3), s1));
        }

        let corners = Space::ALL.into_iter().filter(|s| s.is_corner()).collect();
        let middles = Space::ALL.into_iter().filter(|s| s.is_middle()).collect();

        let outer = winning
            .iter()
            .copied()
            .filter(|pattern| !pattern.contains(&Space::CENTER))
            .collect();

        let diagonal = winning
            .iter()
            .copied()
            .filter(|[s1, s2, s3]| *s2 == Space::CENTER && s1.is_corner() && s3.is_corner())
            .collect();

        let catalog = Self {
            winning,
            partial,
            corners,
            middles,
            outer,
            diagonal,
        };
        debug!(
            winning = catalog.winning.len(),
            partial = catalog.partial.len(),
            "Built pattern catalog"
        );
        catalog
    }

    /// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
    pub fn winning_patterns(&self) -> &[Pattern] {
        &self.winning
    }

    /// Every pair of spaces sharing a winning line, mapped to the space
    /// that completes it, in catalog order.
    pub fn partial_patterns(&self) -> &[(PartialPattern, Space)] {
        &self.partial
    }

    /// Corner spaces `{0, 2, 6, 8}`.
    pub fn corners(&self) -> &[Space] {
        &self.corners
    }

    /// Middle-edge spaces `{1, 3, 5, 7}`.
    pub fn middles(&self) -> &[Space] {
        &self.middles
    }

    /// Winning lines that avoid the center.
    pub fn outer_patterns(&self) -> &[Pattern] {
        &self.outer
    }

    /// Corner-center-corner diagonals.
    pub fn diagonal_patterns(&self) -> &[Pattern] {
        &self.diagonal
    }
}
