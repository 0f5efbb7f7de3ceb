//! Amino acid abbreviations used by `/codon` and `/transl_except` qualifiers.

/// Canonical three-letter (or keyword) abbreviation and one-letter code.
#[rustfmt::skip]
static AMINO_ACIDS: [(&str, u8); 28] = [
    ("Ala", b'A'), ("Arg", b'R'), ("Asn", b'N'), ("Asp", b'D'),
    ("Cys", b'C'), ("Gln", b'Q'), ("Glu", b'E'), ("Gly", b'G'),
    ("His", b'H'), ("Ile", b'I'), ("Leu", b'L'), ("Lys", b'K'),
    ("Met", b'M'), ("Phe", b'F'), ("Pro", b'P'), ("Ser", b'S'),
    ("Thr", b'T'), ("Trp", b'W'), ("Tyr", b'Y'), ("Val", b'V'),
    ("Sec", b'U'), ("Pyl", b'O'), ("Asx", b'B'), ("Glx", b'Z'),
    ("Xle", b'J'), ("Xaa", b'X'), ("TERM", b'*'), ("OTHER", b'X'),
];

/// Result of resolving a declared amino acid abbreviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Abbreviation {
    /// Exactly the canonical spelling.
    Canonical(u8),
    /// Resolvable, but spelled differently from the canonical form
    /// (wrong case, or a one-letter code where a three-letter one belongs).
    NonCanonical { letter: u8, canonical: &'static str },
}

impl Abbreviation {
    #[must_use]
    pub fn letter(self) -> u8 {
        match self {
            Self::Canonical(letter) | Self::NonCanonical { letter, .. } => letter,
        }
    }
}

/// Resolve an abbreviation such as `Sec`, `TERM` or `W`. Returns `None` when unknown.
#[must_use]
pub fn resolve(abbreviation: &str) -> Option<Abbreviation> {
    let abbreviation = abbreviation.trim();
    if let Some(&(_, letter)) = AMINO_ACIDS.iter().find(|(name, _)| *name == abbreviation) {
        return Some(Abbreviation::Canonical(letter));
    }
    if let Some(&(canonical, letter)) = AMINO_ACIDS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(abbreviation))
    {
        return Some(Abbreviation::NonCanonical { letter, canonical });
    }
    let bytes = abbreviation.as_bytes();
    if bytes.len() == 1 {
        let letter = bytes[0].to_ascii_uppercase();
        if let Some(&(canonical, letter)) = AMINO_ACIDS.iter().find(|(_, l)| *l == letter) {
            return Some(Abbreviation::NonCanonical { letter, canonical });
        }
    }
    None
}

/// Three-letter abbreviation for a one-letter code, for message rendering.
#[must_use]
pub fn abbreviation_for(letter: u8) -> Option<&'static str> {
    AMINO_ACIDS
        .iter()
        .find(|(_, l)| *l == letter)
        .map(|&(name, _)| name)
}
