//! Classification of asserted vs conceptual translations.

/// A residue where the asserted translation differs from the conceptual one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResidueDifference {
    /// 1-based position in the translation.
    pub position: usize,
    pub asserted: u8,
    pub conceptual: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Match,
    /// Equal length, differing only at the first residue.
    StartResidue { asserted: u8, conceptual: u8 },
    /// The asserted translation is the conceptual one plus `extra` residues.
    TrailingResidues { extra: usize },
    /// Anything else: first differing position and number of differences,
    /// counting a length difference as differences.
    Mismatch { first: usize, count: usize },
}

/// Compare the asserted translation against the conceptual one.
///
/// For a 3' partial CDS, trailing `X` of the conceptual translation that run
/// past the asserted translation are ignored.
#[must_use]
pub fn compare(asserted: &str, conceptual: &str, three_prime_partial: bool) -> Comparison {
    let asserted = asserted.as_bytes();
    let mut conceptual = conceptual.as_bytes();
    if three_prime_partial {
        while conceptual.len() > asserted.len() && conceptual.last() == Some(&b'X') {
            conceptual = &conceptual[..conceptual.len() - 1];
        }
    }

    if asserted == conceptual {
        return Comparison::Match;
    }
    if asserted.len() > conceptual.len() && asserted.starts_with(conceptual) {
        return Comparison::TrailingResidues {
            extra: asserted.len() - conceptual.len(),
        };
    }

    let differences = find_residue_differences(asserted, conceptual);
    if asserted.len() == conceptual.len()
        && let [only] = differences.as_slice()
        && only.position == 1
    {
        return Comparison::StartResidue {
            asserted: only.asserted,
            conceptual: only.conceptual,
        };
    }

    let shared = asserted.len().min(conceptual.len());
    Comparison::Mismatch {
        first: differences.first().map_or(shared + 1, |d| d.position),
        count: differences.len() + asserted.len().abs_diff(conceptual.len()),
    }
}

/// Differences over the positions both translations share.
fn find_residue_differences(asserted: &[u8], conceptual: &[u8]) -> Vec<ResidueDifference> {
    asserted
        .iter()
        .zip(conceptual)
        .enumerate()
        .filter(|(_, (a, c))| a != c)
        .map(|(i, (&asserted, &conceptual))| ResidueDifference {
            position: i + 1,
            asserted,
            conceptual,
        })
        .collect()
}
