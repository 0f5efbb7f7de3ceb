//! Strand orientation of a compound location.

use std::fmt;

/// Biological orientation of a feature relative to the entry sequence.
///
/// On the reverse strand the 5' end of the feature sits at the genomic right,
/// so 5'/3' partiality maps onto the opposite location flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    #[must_use]
    pub fn from_complement(complement: bool) -> Self {
        if complement {
            Self::Reverse
        } else {
            Self::Forward
        }
    }

    #[must_use]
    pub fn is_reverse(self) -> bool {
        self == Self::Reverse
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "+"),
            Self::Reverse => write!(f, "-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_complement() {
        assert_eq!(Strand::from_complement(false), Strand::Forward);
        assert_eq!(Strand::from_complement(true), Strand::Reverse);
    }

    #[test]
    fn is_reverse() {
        assert!(!Strand::Forward.is_reverse());
        assert!(Strand::Reverse.is_reverse());
    }

    #[test]
    fn display() {
        assert_eq!(Strand::Forward.to_string(), "+");
        assert_eq!(Strand::Reverse.to_string(), "-");
    }
}
