use std::collections::HashSet;
use std::fmt;

use crate::core::position::Position;

/// The distinct positions observed for one barcode combination.
///
/// Positions are held in a set, so inserting a position that is already
/// present is a no-op. Iteration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cluster {
    positions: HashSet<Position>,
}

impl Cluster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_position(&mut self, position: Position) {
        self.positions.insert(position);
    }

    /// Number of distinct positions in this cluster
    #[must_use]
    pub fn size(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[must_use]
    pub fn contains(&self, position: &Position) -> bool {
        self.positions.contains(position)
    }

    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.positions.iter()
    }
}

/// Tab-delimited positions, in no particular order
impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, position) in self.positions.iter().enumerate() {
            if i > 0 {
                f.write_str("\t")?;
            }
            write!(f, "{position}")?;
        }
        Ok(())
    }
}
