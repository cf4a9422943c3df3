use std::fmt;

/// A genomic position: reference sequence name plus 0-based offset.
///
/// Two positions are equal iff both the chromosome and the coordinate are
/// equal, and equal positions hash equally, so `Position` can be used as a
/// set element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    chromosome: String,
    coordinate: u64,
}

impl Position {
    pub fn new(chromosome: impl Into<String>, coordinate: u64) -> Self {
        Self {
            chromosome: chromosome.into(),
            coordinate,
        }
    }

    #[must_use]
    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    #[must_use]
    pub fn coordinate(&self) -> u64 {
        self.coordinate
    }
}

/// Renders as `chromosome:coordinate`, e.g. `chr1:1000`
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chromosome, self.coordinate)
    }
}
