//! Translation of a resolved CDS: reading frame, exceptions and the derived
//! conceptual translation.

pub mod exception;
pub mod frame;

use frame::{Codon, FrameTranslation};

/// Outcome of translating one CDS. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    codons: Vec<Codon>,
    trailing_bases: usize,
    translation: String,
    conceptual_translation: String,
}

impl TranslationResult {
    /// Derive the translations from a frame.
    ///
    /// The conceptual translation drops the terminal stop run; unless the CDS
    /// is 3' partial it is also cut at the first remaining stop.
    #[must_use]
    pub fn new(frame: FrameTranslation, three_prime_partial: bool) -> Self {
        let translation = frame.amino_acids();
        let coding = &translation[..translation.len() - frame.terminal_stop_run()];
        let conceptual_translation = if three_prime_partial {
            coding.to_string()
        } else {
            coding.split('*').next().unwrap_or_default().to_string()
        };
        Self {
            trailing_bases: frame.trailing.len(),
            codons: frame.codons,
            translation,
            conceptual_translation,
        }
    }

    #[must_use]
    pub fn codons(&self) -> &[Codon] {
        &self.codons
    }

    /// Bases left after the last complete codon.
    #[must_use]
    pub fn trailing_bases(&self) -> usize {
        self.trailing_bases
    }

    /// One letter per codon, stops included.
    #[must_use]
    pub fn translation(&self) -> &str {
        &self.translation
    }

    #[must_use]
    pub fn conceptual_translation(&self) -> &str {
        &self.conceptual_translation
    }
}
