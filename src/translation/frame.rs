//! Reading-frame translation of a resolved nucleotide sequence.

use crate::codon::GeneticCodeTable;

/// A translated triplet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codon {
    pub triplet: [u8; 3],
    /// 1-based position of the first base in the resolved sequence.
    pub position: usize,
    pub amino_acid: u8,
    /// Set when a `/codon` or `/transl_except` overrode the table.
    pub is_exception: bool,
}

impl Codon {
    #[must_use]
    pub fn is_stop(&self) -> bool {
        self.amino_acid == b'*'
    }
}

/// Codons of one reading frame plus the bases left over after the last full codon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameTranslation {
    pub codons: Vec<Codon>,
    pub trailing: Vec<u8>,
}

impl FrameTranslation {
    /// Length of the run of stop codons ending the complete codons. Trailing
    /// bases of a partial codon do not break the run.
    #[must_use]
    pub fn terminal_stop_run(&self) -> usize {
        self.codons.iter().rev().take_while(|c| c.is_stop()).count()
    }

    /// True when the frame ends exactly on a codon boundary with a stop.
    #[must_use]
    pub fn ends_with_stop(&self) -> bool {
        self.trailing.is_empty() && self.terminal_stop_run() > 0
    }

    /// 1-based codon numbers of stops that precede the terminal stop run.
    #[must_use]
    pub fn internal_stops(&self) -> Vec<usize> {
        let limit = self.codons.len() - self.terminal_stop_run();
        self.codons[..limit]
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_stop())
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// Every amino acid, stops included.
    #[must_use]
    pub fn amino_acids(&self) -> String {
        self.codons.iter().map(|c| c.amino_acid as char).collect()
    }
}

/// Translates nucleotides three at a time through one genetic code table.
#[derive(Debug, Clone, Copy)]
pub struct FrameTranslator<'a> {
    table: &'a GeneticCodeTable,
}

impl<'a> FrameTranslator<'a> {
    #[must_use]
    pub fn new(table: &'a GeneticCodeTable) -> Self {
        Self { table }
    }

    /// Translate starting at 1-based `codon_start`. Bases before the start are
    /// skipped; a final partial codon is kept aside in `trailing`.
    #[must_use]
    pub fn translate(&self, bases: &[u8], codon_start: usize) -> FrameTranslation {
        let offset = codon_start.saturating_sub(1).min(bases.len());
        let framed = &bases[offset..];
        let chunks = framed.chunks_exact(3);
        let trailing = chunks.remainder().to_vec();
        let codons = chunks
            .enumerate()
            .map(|(i, chunk)| {
                let triplet = [chunk[0], chunk[1], chunk[2]];
                Codon {
                    triplet,
                    position: offset + i * 3 + 1,
                    amino_acid: self.table.translate_codon(&triplet),
                    is_exception: false,
                }
            })
            .collect();
        FrameTranslation { codons, trailing }
    }
}
