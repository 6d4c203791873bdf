/// Junction records: fixed-width rows per gap family
///
/// This module handles:
/// - Gap families (1, 2 or 4 junctions per alignment)
/// - Flattening an accepted skeleton into the legacy column layout
/// - Pooled deletion/insertion labels
/// - CSV output of junction tables
mod output;
mod record;

pub use output::{write_table, JunctionTableWriter};
pub use record::{JunctionRecord, PooledFeatures};

/// Number of junctions an extraction run selects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GapFamily {
    One,
    Two,
    Four,
}

impl GapFamily {
    /// Junctions per accepted alignment
    pub fn n_junctions(&self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
        }
    }

    /// Blocks between the first and the last one
    pub fn n_internal_blocks(&self) -> usize {
        self.n_junctions() - 1
    }

    /// Columns of a record: sample, segment, read id, boundary5, internal
    /// block start/stop pairs, boundary3, then the two pooled feature slots
    pub fn n_columns(&self) -> usize {
        3 + 2 + 2 * self.n_internal_blocks() + 4
    }
}

impl std::str::FromStr for GapFamily {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Self::One),
            "2" => Ok(Self::Two),
            "4" => Ok(Self::Four),
            _ => Err(format!("unsupported gap family '{s}'; expected 1, 2 or 4")),
        }
    }
}

impl std::fmt::Display for GapFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.n_junctions())
    }
}
