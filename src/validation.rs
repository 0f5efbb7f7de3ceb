//! Typed validation messages and the append-only result sink.

use std::fmt;

use serde::Serialize;

use crate::translator::fix::FixKind;

/// Stable message identifiers.
pub mod ids {
    pub const TRANSLATION_MISSING: &str = "CDSTranslator-1";
    pub const START_RESIDUE_MISMATCH: &str = "CDSTranslator-2";
    pub const TRANSLATION_MISMATCH: &str = "CDSTranslator-3";
    pub const INVALID_RANGE: &str = "CDSTranslator-4";
    pub const NO_SEQUENCE: &str = "CDSTranslator-5";
    pub const PSEUDO_TRANSLATION: &str = "CDSTranslator-6";
    pub const REMOTE_SEQUENCE_MISSING: &str = "CDSTranslator-7";
    pub const TRAILING_RESIDUES: &str = "CDSTranslator-16";

    pub const CODON_START_OUT_OF_RANGE: &str = "Translator-1";
    pub const CODON_START_NOT_PARTIAL: &str = "Translator-3";
    pub const EXCEPTION_OUTSIDE_LOCATION: &str = "Translator-5";
    pub const UNKNOWN_AMINO_ACID: &str = "Translator-8";
    pub const NON_CANONICAL_AMINO_ACID: &str = "Translator-9";
    pub const SEQUENCE_TOO_SHORT: &str = "Translator-10";
    pub const NON_MULTIPLE_OF_THREE: &str = "Translator-11";
    pub const MULTIPLE_STOP_CODONS: &str = "Translator-13";
    pub const STOP_CODON_3_PARTIAL: &str = "Translator-14";
    pub const NO_STOP_CODON: &str = "Translator-15";
    pub const INTERNAL_STOP_CODON: &str = "Translator-17";
    pub const NO_START_CODON: &str = "Translator-18";
}

/// Human-readable text for a message id.
#[must_use]
pub fn describe(id: &str) -> &'static str {
    match id {
        ids::TRANSLATION_MISSING => "translation missing on a CDS that is not pseudo",
        ids::START_RESIDUE_MISMATCH => "first amino acid differs from the conceptual translation",
        ids::TRANSLATION_MISMATCH => "translation differs from the conceptual translation",
        ids::INVALID_RANGE => "invalid location range",
        ids::NO_SEQUENCE => "entry has no sequence",
        ids::PSEUDO_TRANSLATION => "translation on a pseudo CDS is ignored",
        ids::REMOTE_SEQUENCE_MISSING => "remote sequence unavailable, translation skipped",
        ids::TRAILING_RESIDUES => "translation has residues beyond the conceptual translation",
        ids::CODON_START_OUT_OF_RANGE => "codon_start must be 1, 2 or 3",
        ids::CODON_START_NOT_PARTIAL => "codon_start is not 1 but the CDS is not 5' partial",
        ids::EXCEPTION_OUTSIDE_LOCATION => "transl_except lies outside the CDS location",
        ids::UNKNOWN_AMINO_ACID => "unknown amino acid, exception not applied",
        ids::NON_CANONICAL_AMINO_ACID => "non-canonical amino acid abbreviation",
        ids::SEQUENCE_TOO_SHORT => "sequence is shorter than the CDS location",
        ids::NON_MULTIPLE_OF_THREE => "CDS length is not a multiple of three",
        ids::MULTIPLE_STOP_CODONS => "more than one stop codon at the 3' end",
        ids::STOP_CODON_3_PARTIAL => "stop codon present but the CDS is 3' partial",
        ids::NO_STOP_CODON => "no stop codon and the CDS is not 3' partial",
        ids::INTERNAL_STOP_CODON => "internal stop codon",
        ids::NO_START_CODON => "no start codon and the CDS is not 5' partial",
        _ => "",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Error,
    Warning,
    Fix,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "ERROR"),
            Self::Warning => write!(f, "WARNING"),
            Self::Fix => write!(f, "FIX"),
        }
    }
}

/// One diagnostic. A FIX message keeps the id of the discrepancy it repaired
/// and names the fix that was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: &'static str,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<FixKind>,
}

impl Message {
    #[must_use]
    pub fn new(id: &'static str, severity: Severity, params: Vec<String>) -> Self {
        Self {
            id,
            severity,
            params,
            fix: None,
        }
    }

    #[must_use]
    pub fn error(id: &'static str, params: Vec<String>) -> Self {
        Self::new(id, Severity::Error, params)
    }

    #[must_use]
    pub fn warning(id: &'static str, params: Vec<String>) -> Self {
        Self::new(id, Severity::Warning, params)
    }

    /// The FIX form of a message.
    #[must_use]
    pub fn fixed(mut self, fix: FixKind) -> Self {
        self.severity = Severity::Fix;
        self.fix = Some(fix);
        self
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.severity, self.id, describe(self.id))?;
        if !self.params.is_empty() {
            write!(f, " [{}]", self.params.join(", "))?;
        }
        if let Some(fix) = self.fix {
            write!(f, " ({fix})")?;
        }
        Ok(())
    }
}

/// Append-only collection of messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    messages: Vec<Message>,
}

impl ValidationResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn extend(&mut self, other: ValidationResult) {
        self.messages.extend(other.messages);
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Valid unless an ERROR was recorded; warnings and fixes never invalidate.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.messages.iter().any(|m| m.severity == Severity::Error)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.messages.iter().any(|m| m.id == id)
    }

    #[must_use]
    pub fn contains_with(&self, id: &str, severity: Severity) -> bool {
        self.messages
            .iter()
            .any(|m| m.id == id && m.severity == severity)
    }

    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.messages.iter().filter(|m| m.severity == severity).count()
    }

    /// Fixes applied, in the order they fired.
    pub fn fixes(&self) -> impl Iterator<Item = FixKind> + '_ {
        self.messages.iter().filter_map(|m| m.fix)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }
}
