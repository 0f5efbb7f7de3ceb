//! `/codon` and `/transl_except` overrides of the table translation.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::amino_acid::{self, Abbreviation};
use crate::error::Error;
use crate::location::CompoundLocation;
use crate::resolver::ResolvedSequence;
use crate::validation::{Message, ids};

use super::frame::{Codon, FrameTranslation};

static CODON_EXCEPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\(\s*seq\s*:\s*"([A-Za-z]{3})"\s*,\s*aa\s*:\s*([A-Za-z]+)\s*\)$"#).unwrap()
});

static TRANSL_EXCEPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(\s*pos\s*:\s*(.+?)\s*,\s*aa\s*:\s*([A-Za-z]+)\s*\)$").unwrap()
});

/// `/codon=(seq:"tga",aa:Trp)`: every in-frame occurrence of the triplet
/// translates to the given amino acid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodonException {
    pub triplet: [u8; 3],
    pub amino_acid: String,
}

impl FromStr for CodonException {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = CODON_EXCEPTION_RE
            .captures(s.trim())
            .ok_or_else(|| Error::Configuration(format!("malformed /codon qualifier: '{s}'")))?;
        let seq = captures[1].to_ascii_lowercase();
        let bytes = seq.as_bytes();
        Ok(Self {
            triplet: [bytes[0], bytes[1], bytes[2]],
            amino_acid: captures[2].to_string(),
        })
    }
}

/// `/transl_except=(pos:complement(213..215),aa:Sec)`: the codon at a genomic
/// position translates to the given amino acid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslException {
    pub location: CompoundLocation,
    pub amino_acid: String,
}

impl FromStr for TranslException {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || Error::Configuration(format!("malformed /transl_except qualifier: '{s}'"));
        let captures = TRANSL_EXCEPT_RE.captures(s.trim()).ok_or_else(malformed)?;
        let location = captures[1].parse().map_err(|_| malformed())?;
        Ok(Self {
            location,
            amino_acid: captures[2].to_string(),
        })
    }
}

/// Overlays exceptions onto a frame translation.
pub struct ExceptionApplicator<'a> {
    pub codon_exceptions: &'a [CodonException],
    pub transl_excepts: &'a [TranslException],
    pub resolved: &'a ResolvedSequence,
    pub codon_start: usize,
}

impl ExceptionApplicator<'_> {
    /// Apply `/codon` exceptions, then `/transl_except`s, returning any messages raised.
    pub fn apply(&self, frame: &mut FrameTranslation) -> Vec<Message> {
        let mut messages = Vec::new();
        for exception in self.codon_exceptions {
            let Some(letter) = resolve_amino_acid(&exception.amino_acid, &mut messages) else {
                continue;
            };
            for codon in frame
                .codons
                .iter_mut()
                .filter(|c| c.triplet.eq_ignore_ascii_case(&exception.triplet))
            {
                codon.amino_acid = letter;
                codon.is_exception = true;
            }
        }
        for exception in self.transl_excepts {
            self.apply_transl_except(exception, frame, &mut messages);
        }
        messages
    }

    fn apply_transl_except(
        &self,
        exception: &TranslException,
        frame: &mut FrameTranslation,
        messages: &mut Vec<Message>,
    ) {
        let Some(letter) = resolve_amino_acid(&exception.amino_acid, messages) else {
            return;
        };
        if exception.location.has_remote() {
            debug!(location = %exception.location, "remote transl_except not applied");
            return;
        }

        let indices: Option<Vec<usize>> = exception
            .location
            .segments
            .iter()
            .flat_map(|s| [s.begin(), s.end()])
            .map(|position| self.resolved.linear_index(position))
            .collect();
        let Some(indices) = indices else {
            messages.push(Message::error(
                ids::EXCEPTION_OUTSIDE_LOCATION,
                vec![exception.location.to_string()],
            ));
            return;
        };
        let (Some(&first), Some(&last)) = (indices.iter().min(), indices.iter().max()) else {
            return;
        };

        let offset = self.codon_start - 1;
        if first < offset || (first - offset) % 3 != 0 {
            debug!(
                location = %exception.location,
                codon_start = self.codon_start,
                "transl_except not on a codon boundary, skipped"
            );
            return;
        }

        let index = (first - offset) / 3;
        let span = last - first + 1;
        if let Some(codon) = frame.codons.get_mut(index) {
            codon.amino_acid = letter;
            codon.is_exception = true;
        } else if index == frame.codons.len()
            && letter == b'*'
            && !frame.trailing.is_empty()
            && span <= frame.trailing.len()
        {
            // Stop codon completed by polyadenylation.
            let mut triplet = [b'a'; 3];
            triplet[..frame.trailing.len()].copy_from_slice(&frame.trailing);
            frame.codons.push(Codon {
                triplet,
                position: offset + index * 3 + 1,
                amino_acid: b'*',
                is_exception: true,
            });
            frame.trailing.clear();
        } else {
            debug!(location = %exception.location, "transl_except beyond the last codon, skipped");
        }
    }
}

/// Resolve a declared abbreviation, recording unknown and non-canonical spellings.
fn resolve_amino_acid(abbreviation: &str, messages: &mut Vec<Message>) -> Option<u8> {
    match amino_acid::resolve(abbreviation) {
        Some(Abbreviation::Canonical(letter)) => Some(letter),
        Some(Abbreviation::NonCanonical { letter, canonical }) => {
            messages.push(Message::warning(
                ids::NON_CANONICAL_AMINO_ACID,
                vec![abbreviation.to_string(), canonical.to_string()],
            ));
            Some(letter)
        }
        None => {
            messages.push(Message::warning(
                ids::UNKNOWN_AMINO_ACID,
                vec![abbreviation.to_string()],
            ));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codon::GeneticCodes;
    use crate::location::parser::parse_location;
    use crate::resolver::resolve;
    use crate::sequence::{NoRemoteSequences, Sequence};
    use crate::translation::frame::FrameTranslator;

    struct Fixture {
        resolved: ResolvedSequence,
        frame: FrameTranslation,
    }

    fn fixture(sequence: &str, location: &str, codon_start: usize) -> Fixture {
        let codes = GeneticCodes::ncbi();
        let resolved = resolve(
            &parse_location(location).unwrap(),
            &Sequence::from(sequence),
            &NoRemoteSequences,
        )
        .unwrap();
        let frame = FrameTranslator::new(codes.get(1).unwrap()).translate(resolved.bases(), codon_start);
        Fixture { resolved, frame }
    }

    fn apply(
        fixture: &mut Fixture,
        codon_exceptions: &[&str],
        transl_excepts: &[&str],
        codon_start: usize,
    ) -> Vec<Message> {
        let codon_exceptions: Vec<CodonException> =
            codon_exceptions.iter().map(|s| s.parse().unwrap()).collect();
        let transl_excepts: Vec<TranslException> =
            transl_excepts.iter().map(|s| s.parse().unwrap()).collect();
        let applicator = ExceptionApplicator {
            codon_exceptions: &codon_exceptions,
            transl_excepts: &transl_excepts,
            resolved: &fixture.resolved,
            codon_start,
        };
        applicator.apply(&mut fixture.frame)
    }

    #[test]
    fn parse_codon_exception() {
        let exception: CodonException = "(seq:\"TGA\",aa:Trp)".parse().unwrap();
        assert_eq!(&exception.triplet, b"tga");
        assert_eq!(exception.amino_acid, "Trp");
        assert!("(seq:\"tg\",aa:Trp)".parse::<CodonException>().is_err());
        assert!("seq:tga".parse::<CodonException>().is_err());
    }

    #[test]
    fn parse_transl_except() {
        let exception: TranslException = "(pos:complement(213..215),aa:Sec)".parse().unwrap();
        assert!(exception.location.global_complement);
        assert_eq!(exception.location.min_position(), Some(213));
        assert_eq!(exception.amino_acid, "Sec");
        assert!("(pos:x..y,aa:Sec)".parse::<TranslException>().is_err());
        assert!("(aa:Sec)".parse::<TranslException>().is_err());
    }

    #[test]
    fn codon_exception_applies_to_every_occurrence() {
        let mut fixture = fixture("atgtgaaaatgataa", "1..15", 1);
        let messages = apply(&mut fixture, &["(seq:\"tga\",aa:Trp)"], &[], 1);
        assert!(messages.is_empty());
        assert_eq!(fixture.frame.amino_acids(), "MWKW*");
        assert!(fixture.frame.codons[1].is_exception);
        assert!(fixture.frame.codons[3].is_exception);
        assert!(!fixture.frame.codons[4].is_exception);
    }

    #[test]
    fn transl_except_on_codon_boundary() {
        let mut fixture = fixture("atgtgaaaataa", "1..12", 1);
        let messages = apply(&mut fixture, &[], &["(pos:4..6,aa:Sec)"], 1);
        assert!(messages.is_empty());
        assert_eq!(fixture.frame.amino_acids(), "MUK*");
    }

    #[test]
    fn transl_except_on_reverse_strand() {
        // reads atg tga aat aa
        let mut fixture = fixture("ttatttcacat", "complement(1..11)", 1);
        assert_eq!(fixture.frame.amino_acids(), "M*N");
        let messages = apply(&mut fixture, &[], &["(pos:complement(6..8),aa:Sec)"], 1);
        assert!(messages.is_empty());
        assert_eq!(fixture.frame.amino_acids(), "MUN");
    }

    #[test]
    fn misaligned_transl_except_is_skipped() {
        let mut fixture = fixture("atgtgaaaataa", "1..12", 1);
        let messages = apply(&mut fixture, &[], &["(pos:5..7,aa:Sec)"], 1);
        assert!(messages.is_empty());
        assert_eq!(fixture.frame.amino_acids(), "M*K*");
    }

    #[test]
    fn transl_except_respects_codon_start() {
        let mut fixture = fixture("gatgtgaaaataa", "1..13", 2);
        let messages = apply(&mut fixture, &[], &["(pos:5..7,aa:Sec)"], 2);
        assert!(messages.is_empty());
        assert_eq!(fixture.frame.amino_acids(), "MUK*");
    }

    #[test]
    fn transl_except_outside_location() {
        let mut fixture = fixture("atgtgaaaataacc", "1..12", 1);
        let messages = apply(&mut fixture, &[], &["(pos:13..14,aa:Sec)"], 1);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, ids::EXCEPTION_OUTSIDE_LOCATION);
    }

    #[test]
    fn remote_transl_except_is_rejected() {
        let mut fixture = fixture("atgtgaaaataa", "1..12", 1);
        let messages = apply(&mut fixture, &[], &["(pos:AB000001.1:4..6,aa:Sec)"], 1);
        assert!(messages.is_empty());
        assert_eq!(fixture.frame.amino_acids(), "M*K*");
    }

    #[test]
    fn term_completes_trailing_codon() {
        let mut fixture = fixture("atgaaat", "1..7", 1);
        assert_eq!(fixture.frame.trailing, b"t");
        let messages = apply(&mut fixture, &[], &["(pos:7,aa:TERM)"], 1);
        assert!(messages.is_empty());
        assert_eq!(fixture.frame.amino_acids(), "MK*");
        assert!(fixture.frame.trailing.is_empty());
        assert_eq!(&fixture.frame.codons[2].triplet, b"taa");
    }

    #[test]
    fn amino_acid_spelling_warnings() {
        let mut fixture = fixture("atgtgaaaataa", "1..12", 1);
        let messages = apply(&mut fixture, &[], &["(pos:4..6,aa:SEC)", "(pos:7..9,aa:Foo)"], 1);
        let found: Vec<_> = messages.iter().map(|m| m.id).collect();
        assert_eq!(found, vec![ids::NON_CANONICAL_AMINO_ACID, ids::UNKNOWN_AMINO_ACID]);
        assert_eq!(fixture.frame.amino_acids(), "MUK*");
    }
}
