//! Algorithm identifiers.

use std::fmt;

/// Compression algorithm.
///
/// Ids are contiguous and ordered from the fastest, weakest codec to the
/// slowest, strongest one. The id doubles as the level selected on the
/// command line and as the tag written into every frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Algorithm {
    /// LZ4 block compression (fastest)
    Lz4 = 1,
    /// Raw deflate
    Deflate = 2,
    /// Brotli (best ratio)
    Brotli = 3,
}

impl Algorithm {
    /// Every algorithm in ascending id order.
    pub const ALL: [Algorithm; 3] = [Algorithm::Lz4, Algorithm::Deflate, Algorithm::Brotli];

    /// Lowest id in the enumeration.
    pub const FIRST: Algorithm = Algorithm::Lz4;

    /// Highest id in the enumeration.
    pub const LAST: Algorithm = Algorithm::Brotli;

    /// Numeric id.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Look up an algorithm by id.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Algorithm::Lz4),
            2 => Some(Algorithm::Deflate),
            3 => Some(Algorithm::Brotli),
            _ => None,
        }
    }

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Lz4 => "lz4",
            Algorithm::Deflate => "deflate",
            Algorithm::Brotli => "brotli",
        }
    }

    /// Display label used in report headers.
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Lz4 => "LZ4 algorithm",
            Algorithm::Deflate => "Deflate algorithm",
            Algorithm::Brotli => "Brotli algorithm",
        }
    }

    /// The algorithm with the next id, if any.
    pub fn next(self) -> Option<Self> {
        Self::from_id(self.id() + 1)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Algorithm {
    type Err = String;

    /// Accepts either the numeric id or the name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(id) = s.parse::<u8>() {
            return Self::from_id(id).ok_or_else(|| {
                format!(
                    "level {} is out of range ({}..={})",
                    id,
                    Self::FIRST.id(),
                    Self::LAST.id()
                )
            });
        }
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown algorithm '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_contiguous() {
        for pair in Algorithm::ALL.windows(2) {
            assert_eq!(pair[0].id() + 1, pair[1].id());
            assert_eq!(pair[0].next(), Some(pair[1]));
        }
        assert_eq!(Algorithm::LAST.next(), None);
    }

    #[test]
    fn test_from_id_roundtrip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(Algorithm::from_id(algorithm.id()), Some(algorithm));
        }
        assert_eq!(Algorithm::from_id(0), None);
        assert_eq!(Algorithm::from_id(4), None);
    }

    #[test]
    fn test_parse_level_and_name() {
        assert_eq!("1".parse::<Algorithm>(), Ok(Algorithm::Lz4));
        assert_eq!("Brotli".parse::<Algorithm>(), Ok(Algorithm::Brotli));
        assert!("7".parse::<Algorithm>().unwrap_err().contains("out of range"));
        assert!("zip".parse::<Algorithm>().is_err());
    }
}
