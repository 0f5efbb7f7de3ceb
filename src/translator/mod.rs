//! The CDS translator: resolves, translates and reconciles one feature.
//!
//! Every discrepancy is reported as an ERROR unless fix mode is on and the
//! matching fix is enabled, in which case the fix is proposed against a working
//! copy of the location. Proposed fixes are committed to the feature only when
//! no ERROR was raised before the comparison with the asserted translation;
//! otherwise they are reported as ERRORs and the feature is left untouched.
//! Comparison outcomes are reported alongside committed fixes.

pub mod compare;
pub mod fix;

use tracing::{debug, warn};

use crate::amino_acid;
use crate::codon::GeneticCodes;
use crate::config::TranslatorConfig;
use crate::error::Error;
use crate::feature::CdsFeature;
use crate::location::CompoundLocation;
use crate::resolver::resolve;
use crate::sequence::{Entry, SequenceProvider};
use crate::translation::TranslationResult;
use crate::translation::exception::{CodonException, ExceptionApplicator, TranslException};
use crate::translation::frame::FrameTranslator;
use crate::validation::{Message, Severity, ValidationResult, ids};

use compare::Comparison;
use fix::{FeatureEdit, FixKind};

/// What one translate call produced.
#[derive(Debug, Clone)]
pub struct CdsOutcome {
    pub result: ValidationResult,
    /// Absent when translation was skipped or aborted before a frame was read.
    pub translation: Option<TranslationResult>,
    /// True when fixes were committed to the feature.
    pub fixed: bool,
}

enum Pending {
    Report(Message),
    Fix(Message, FixKind),
    /// Outcome of comparing with the asserted translation; never blocks a commit.
    Comparison(Message),
}

/// Messages and proposed changes of one translate call.
struct Pass<'c> {
    config: &'c TranslatorConfig,
    pending: Vec<Pending>,
    location: CompoundLocation,
    edit: FeatureEdit,
}

impl<'c> Pass<'c> {
    fn new(config: &'c TranslatorConfig, location: &CompoundLocation) -> Self {
        Self {
            config,
            pending: Vec::new(),
            location: location.clone(),
            edit: FeatureEdit::default(),
        }
    }

    fn report(&mut self, message: Message) {
        self.pending.push(Pending::Report(message));
    }

    fn compared(&mut self, message: Message) {
        self.pending.push(Pending::Comparison(message));
    }

    /// Record a fixable discrepancy. Returns true when the caller should apply
    /// the fix to the working state.
    fn propose(&mut self, message: Message, fix: FixKind) -> bool {
        if self.config.fix_enabled(fix) {
            debug!(id = message.id, %fix, "fix proposed");
            self.pending.push(Pending::Fix(message, fix));
            true
        } else {
            self.report(message);
            false
        }
    }

    fn finish(self, feature: &mut CdsFeature, translation: Option<TranslationResult>) -> CdsOutcome {
        let blocked = self
            .pending
            .iter()
            .any(|p| matches!(p, Pending::Report(m) if m.severity == Severity::Error));
        let proposed = self.pending.iter().any(|p| matches!(p, Pending::Fix(..)));
        let commit = proposed && !blocked;

        let mut result = ValidationResult::new();
        for pending in self.pending {
            result.append(match pending {
                Pending::Report(message) | Pending::Comparison(message) => message,
                Pending::Fix(message, fix) if commit => message.fixed(fix),
                Pending::Fix(message, _) => message,
            });
        }

        let mut edit = self.edit;
        let mut fixed = false;
        if commit {
            if self.location != feature.location {
                edit.set_location(self.location);
            }
            fixed = edit.commit(feature);
            debug!(location = %feature.location, "fixes committed");
        } else if proposed {
            debug!(location = %feature.location, "fixes discarded, feature has errors");
        }

        CdsOutcome {
            result,
            translation,
            fixed,
        }
    }
}

/// Translates CDS features against a shared genetic code registry.
#[derive(Debug, Clone)]
pub struct CdsTranslator<'a> {
    codes: &'a GeneticCodes,
    config: TranslatorConfig,
}

impl<'a> CdsTranslator<'a> {
    #[must_use]
    pub fn new(codes: &'a GeneticCodes, config: TranslatorConfig) -> Self {
        Self { codes, config }
    }

    #[must_use]
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translate `feature` and reconcile it with its asserted translation.
    ///
    /// Returns `Err` only for configuration problems (unknown table, malformed
    /// qualifier values) and I/O failures; data problems become messages.
    pub fn translate(
        &self,
        feature: &mut CdsFeature,
        entry: &Entry,
        provider: &dyn SequenceProvider,
    ) -> Result<CdsOutcome, Error> {
        let mut pass = Pass::new(&self.config, &feature.location);

        if feature.is_pseudo() {
            if feature.translation().is_some() {
                pass.report(Message::warning(ids::PSEUDO_TRANSLATION, vec![]));
            }
            return Ok(pass.finish(feature, None));
        }

        let table_number = feature
            .transl_table()?
            .unwrap_or(self.config.default_translation_table);
        let table = self.codes.get(table_number)?;

        let codon_start = match feature.codon_start()? {
            None => 1,
            Some(n @ 1..=3) => n as usize,
            Some(n) => {
                pass.report(Message::error(ids::CODON_START_OUT_OF_RANGE, vec![n.to_string()]));
                return Ok(pass.finish(feature, None));
            }
        };

        let codon_exceptions = feature
            .codon_exceptions()
            .map(str::parse)
            .collect::<Result<Vec<CodonException>, _>>()?;
        let transl_excepts = feature
            .transl_excepts()
            .map(str::parse)
            .collect::<Result<Vec<TranslException>, _>>()?;

        if pass.location.segments.is_empty() {
            pass.report(Message::error(ids::INVALID_RANGE, vec!["no segments".to_string()]));
            return Ok(pass.finish(feature, None));
        }
        let inverted = pass.location.inverted_segments();
        if !inverted.is_empty() {
            let segments = inverted
                .iter()
                .map(|&i| pass.location.segments[i].to_string())
                .collect();
            if pass.propose(Message::error(ids::INVALID_RANGE, segments), FixKind::SwapInvertedSegment) {
                pass.location.swap_inverted_segments();
            } else {
                return Ok(pass.finish(feature, None));
            }
        }

        let Some(sequence) = entry.sequence.as_ref() else {
            pass.report(Message::error(ids::NO_SEQUENCE, vec![]));
            return Ok(pass.finish(feature, None));
        };

        let resolved = match resolve(&pass.location, sequence, provider) {
            Ok(resolved) => resolved,
            Err(Error::MissingRemoteSequence(id)) => {
                warn!(accession = %id, location = %pass.location, "remote sequence unavailable, translation skipped");
                pass.report(Message::warning(ids::REMOTE_SEQUENCE_MISSING, vec![id]));
                return Ok(pass.finish(feature, None));
            }
            Err(e) => return Err(e),
        };

        if (resolved.padded_left() > 0 && !pass.location.left_partial)
            || (resolved.padded_right() > 0 && !pass.location.right_partial)
        {
            pass.report(Message::error(
                ids::SEQUENCE_TOO_SHORT,
                vec![sequence.len().to_string(), pass.location.to_string()],
            ));
            return Ok(pass.finish(feature, None));
        }

        if codon_start != 1
            && !pass.location.is_five_prime_partial()
            && pass.propose(
                Message::error(ids::CODON_START_NOT_PARTIAL, vec![codon_start.to_string()]),
                FixKind::CodonStartNotOneMake5Partial,
            )
        {
            pass.location.set_five_prime_partial(true);
        }

        let mut frame = FrameTranslator::new(table).translate(resolved.bases(), codon_start);
        let applicator = ExceptionApplicator {
            codon_exceptions: &codon_exceptions,
            transl_excepts: &transl_excepts,
            resolved: &resolved,
            codon_start,
        };
        for message in applicator.apply(&mut frame) {
            pass.report(message);
        }

        if frame.codons.is_empty() {
            pass.report(Message::error(
                ids::SEQUENCE_TOO_SHORT,
                vec![resolved.len().to_string(), pass.location.to_string()],
            ));
            return Ok(pass.finish(feature, None));
        }

        let excused = feature.has_exception();

        let mut length_reported = false;
        if !frame.trailing.is_empty() && !pass.location.is_three_prime_partial() {
            length_reported = true;
            if pass.propose(
                Message::error(ids::NON_MULTIPLE_OF_THREE, vec![resolved.len().to_string()]),
                FixKind::NonMultipleOfThreeMake3And5Partial,
            ) {
                pass.location.left_partial = true;
                pass.location.right_partial = true;
            }
        }

        if codon_start == 1 && !pass.location.is_five_prime_partial() {
            let first = &mut frame.codons[0];
            if table.is_start_codon(&first.triplet) {
                if !first.is_exception {
                    first.amino_acid = b'M';
                }
            } else {
                let triplet = String::from_utf8_lossy(&first.triplet).into_owned();
                if pass.propose(
                    Message::error(ids::NO_START_CODON, vec![triplet]),
                    FixKind::NoStartCodonMake5Partial,
                ) {
                    pass.location.set_five_prime_partial(true);
                }
            }
        }

        let stop_run = frame.terminal_stop_run();
        if stop_run > 1 {
            pass.report(Message::error(ids::MULTIPLE_STOP_CODONS, vec![stop_run.to_string()]));
        }

        let internal = frame.internal_stops();
        if !internal.is_empty() {
            let params = internal.iter().map(ToString::to_string).collect();
            if excused {
                pass.report(Message::warning(ids::INTERNAL_STOP_CODON, params));
            } else if pass.propose(
                Message::error(ids::INTERNAL_STOP_CODON, params),
                FixKind::InternalStopCodonMakePseudo,
            ) {
                pass.edit.make_pseudo();
                let translation = TranslationResult::new(frame, pass.location.is_three_prime_partial());
                return Ok(pass.finish(feature, Some(translation)));
            }
        }

        if frame.ends_with_stop() && pass.location.is_three_prime_partial() {
            if pass.propose(
                Message::error(ids::STOP_CODON_3_PARTIAL, vec![]),
                FixKind::ValidStopCodonRemove3Partial,
            ) {
                pass.location.set_three_prime_partial(false);
            }
        } else if stop_run == 0
            && !pass.location.is_three_prime_partial()
            && !length_reported
            && pass.propose(
                Message::error(ids::NO_STOP_CODON, vec![]),
                FixKind::NoStopCodonMake3Partial,
            )
        {
            pass.location.set_three_prime_partial(true);
        }

        let three_prime_partial = pass.location.is_three_prime_partial();
        let translation = TranslationResult::new(frame, three_prime_partial);

        match feature.translation() {
            None => pass.compared(Message::error(ids::TRANSLATION_MISSING, vec![])),
            Some(asserted) => {
                let conceptual = translation.conceptual_translation();
                match compare::compare(&asserted, conceptual, three_prime_partial) {
                    Comparison::Match => {}
                    Comparison::StartResidue {
                        asserted: was,
                        conceptual: expected,
                    } => {
                        let params = vec![residue_name(was), residue_name(expected)];
                        if excused {
                            pass.compared(Message::warning(ids::START_RESIDUE_MISMATCH, params));
                        } else if pass.propose(
                            Message::error(ids::START_RESIDUE_MISMATCH, params),
                            FixKind::TranslationStartResidue,
                        ) {
                            let mut corrected = String::with_capacity(asserted.len());
                            corrected.push(expected as char);
                            corrected.push_str(asserted.get(1..).unwrap_or_default());
                            pass.edit.replace_translation(corrected);
                        }
                    }
                    Comparison::TrailingResidues { extra } => {
                        pass.compared(discrepancy(ids::TRAILING_RESIDUES, excused, vec![extra.to_string()]));
                    }
                    Comparison::Mismatch { first, count } => {
                        pass.compared(discrepancy(
                            ids::TRANSLATION_MISMATCH,
                            excused,
                            vec![first.to_string(), count.to_string()],
                        ));
                    }
                }
            }
        }

        Ok(pass.finish(feature, Some(translation)))
    }
}

/// Three-letter name of a residue, or the letter itself when it has none.
fn residue_name(letter: u8) -> String {
    amino_acid::abbreviation_for(letter).map_or_else(|| (letter as char).to_string(), str::to_string)
}

/// An unfixable translation discrepancy; a WARNING when `/exception` excuses it.
fn discrepancy(id: &'static str, excused: bool, params: Vec<String>) -> Message {
    if excused {
        Message::warning(id, params)
    } else {
        Message::error(id, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::qualifier;
    use crate::location::Location;
    use crate::location::parser::parse_location;
    use crate::sequence::{NoRemoteSequences, RemoteSequences, Sequence, reverse_complement};

    const AGNOPROTEIN: &str =
        "MVLRQLSRKASVKVSKTWSGTKKRAQRILIFLLEFLLDFCTGEDSVDGKKRQKHSGLTEQKYSALPEPKAT";

    fn report_mode() -> TranslatorConfig {
        TranslatorConfig::default()
    }

    fn fix_mode() -> TranslatorConfig {
        TranslatorConfig {
            fix_mode: true,
            ..TranslatorConfig::default()
        }
    }

    fn cds(location: &str, translation: Option<&str>) -> CdsFeature {
        let feature = CdsFeature::new(parse_location(location).unwrap());
        match translation {
            Some(t) => feature.with_qualifier(qualifier::TRANSLATION, Some(t)),
            None => feature,
        }
    }

    fn run(config: TranslatorConfig, feature: &mut CdsFeature, sequence: &str) -> CdsOutcome {
        let codes = GeneticCodes::ncbi();
        let entry = Entry::new(Some("TEST1"), Sequence::from(sequence));
        CdsTranslator::new(&codes, config)
            .translate(feature, &entry, &NoRemoteSequences)
            .unwrap()
    }

    fn ids_of(outcome: &CdsOutcome) -> Vec<&'static str> {
        outcome.result.messages().iter().map(|m| m.id).collect()
    }

    /// One codon per residue, valid in tables 1 and 11.
    fn back_translate(peptide: &str) -> String {
        peptide
            .chars()
            .map(|aa| match aa {
                'A' => "gct",
                'R' => "cgt",
                'N' => "aat",
                'D' => "gat",
                'C' => "tgt",
                'Q' => "caa",
                'E' => "gaa",
                'G' => "ggt",
                'H' => "cat",
                'I' => "att",
                'L' => "ctg",
                'K' => "aaa",
                'M' => "atg",
                'F' => "ttt",
                'P' => "cct",
                'S' => "tct",
                'T' => "act",
                'W' => "tgg",
                'Y' => "tat",
                'V' => "gtt",
                other => panic!("no codon for {other}"),
            })
            .collect()
    }

    #[test]
    fn stop_codon_on_three_prime_partial() {
        let mut feature = cds("1..>6", Some("M"));
        let outcome = run(report_mode(), &mut feature, "atgtag");
        assert_eq!(ids_of(&outcome), vec![ids::STOP_CODON_3_PARTIAL]);
        assert!(!outcome.result.is_valid());
        assert!(!outcome.fixed);
        assert_eq!(feature.location.to_string(), "1..>6");

        let outcome = run(fix_mode(), &mut feature, "atgtag");
        assert!(outcome.result.contains_with(ids::STOP_CODON_3_PARTIAL, Severity::Fix));
        assert_eq!(
            outcome.result.fixes().collect::<Vec<_>>(),
            vec![FixKind::ValidStopCodonRemove3Partial]
        );
        assert!(outcome.result.is_valid());
        assert!(outcome.fixed);
        assert_eq!(feature.location.to_string(), "1..6");
    }

    #[test]
    fn missing_stop_codon() {
        let mut feature = cds("1..3", Some("M"));
        let outcome = run(report_mode(), &mut feature, "atg");
        assert_eq!(ids_of(&outcome), vec![ids::NO_STOP_CODON]);

        let outcome = run(fix_mode(), &mut feature, "atg");
        assert!(outcome.result.contains_with(ids::NO_STOP_CODON, Severity::Fix));
        assert_eq!(feature.location.to_string(), "1..>3");
    }

    #[test]
    fn internal_stop_codon() {
        let mut feature = cds("1..12", Some("M"));
        let outcome = run(report_mode(), &mut feature, "atgtagaaatag");
        assert_eq!(ids_of(&outcome), vec![ids::INTERNAL_STOP_CODON]);
        assert_eq!(outcome.result.messages()[0].params, vec!["2"]);

        let outcome = run(fix_mode(), &mut feature, "atgtagaaatag");
        assert!(outcome.result.contains_with(ids::INTERNAL_STOP_CODON, Severity::Fix));
        assert!(feature.is_pseudo());
        assert_eq!(feature.translation(), None);
    }

    #[test]
    fn internal_stop_excused_by_exception() {
        let mut feature = cds("1..12", Some("MXK"))
            .with_qualifier(qualifier::EXCEPTION, Some("RNA editing"));
        let outcome = run(fix_mode(), &mut feature, "atgtagaaatag");
        assert!(outcome.result.contains_with(ids::INTERNAL_STOP_CODON, Severity::Warning));
        assert!(!outcome.fixed);
        assert!(!feature.is_pseudo());
    }

    #[test]
    fn non_multiple_of_three() {
        let mut feature = cds("5..8", Some("M"));
        let outcome = run(report_mode(), &mut feature, "atggatga");
        assert_eq!(ids_of(&outcome), vec![ids::NON_MULTIPLE_OF_THREE]);

        let outcome = run(fix_mode(), &mut feature, "atggatga");
        assert_eq!(
            outcome.result.fixes().collect::<Vec<_>>(),
            vec![FixKind::NonMultipleOfThreeMake3And5Partial]
        );
        assert_eq!(feature.location.to_string(), "<5..>8");
        assert_eq!(outcome.translation.unwrap().conceptual_translation(), "M");
    }

    #[test]
    fn jc_polyomavirus_agnoprotein() {
        let coding = format!("{}tag", back_translate(AGNOPROTEIN));
        assert_eq!(coding.len(), 216);
        let sequence = format!("{}{}{}", "c".repeat(265), coding, "g".repeat(40));

        let mut feature = cds("266..481", Some(AGNOPROTEIN))
            .with_qualifier(qualifier::TRANSL_TABLE, Some("11"));
        let outcome = run(report_mode(), &mut feature, &sequence);
        assert!(outcome.result.is_empty(), "{:?}", outcome.result);
        let translation = outcome.translation.unwrap();
        assert_eq!(translation.conceptual_translation(), AGNOPROTEIN);
        assert_eq!(translation.codons().len(), 72);
    }

    #[test]
    fn fixes_are_idempotent() {
        for (location, sequence) in [
            ("1..>6", "atgtag"),
            ("1..3", "atg"),
            ("1..12", "atgtagaaatag"),
            ("5..8", "atggatga"),
            ("1..9", "aaaaaataa"),
            ("1..10", "atgaaatagc"),
        ] {
            let mut feature = cds(location, None);
            let conceptual = run(report_mode(), &mut feature.clone(), sequence)
                .translation
                .unwrap();
            feature.set_qualifier(
                qualifier::TRANSLATION,
                Some(conceptual.conceptual_translation()),
            );

            let first = run(fix_mode(), &mut feature, sequence);
            assert!(first.fixed, "{location}: {:?}", first.result);
            let snapshot = feature.clone();

            let second = run(fix_mode(), &mut feature, sequence);
            assert!(second.result.is_valid(), "{location}: {:?}", second.result);
            assert_eq!(second.result.fixes().count(), 0, "{location}");
            assert!(!second.fixed);
            assert_eq!(feature, snapshot);
        }
    }

    #[test]
    fn stop_before_trailing_base_is_not_internal() {
        let mut feature = cds("1..10", Some("MK"));
        let outcome = run(report_mode(), &mut feature, "atgaaatagc");
        assert_eq!(ids_of(&outcome), vec![ids::NON_MULTIPLE_OF_THREE]);
        assert_eq!(outcome.translation.unwrap().conceptual_translation(), "MK");

        let outcome = run(fix_mode(), &mut feature, "atgaaatagc");
        assert_eq!(
            outcome.result.fixes().collect::<Vec<_>>(),
            vec![FixKind::NonMultipleOfThreeMake3And5Partial]
        );
        assert!(outcome.result.is_valid());
        assert!(!feature.is_pseudo());
        assert_eq!(feature.location.to_string(), "<1..>10");
        assert_eq!(feature.translation().as_deref(), Some("MK"));
    }

    #[test]
    fn fixes_apply_without_asserted_translation() {
        for (location, sequence, fix, fixed) in [
            ("1..3", "atg", FixKind::NoStopCodonMake3Partial, "1..>3"),
            ("1..>6", "atgtag", FixKind::ValidStopCodonRemove3Partial, "1..6"),
            ("5..8", "atggatga", FixKind::NonMultipleOfThreeMake3And5Partial, "<5..>8"),
        ] {
            let mut feature = cds(location, None);
            let outcome = run(fix_mode(), &mut feature, sequence);
            assert_eq!(outcome.result.fixes().collect::<Vec<_>>(), vec![fix], "{location}");
            assert!(
                outcome.result.contains_with(ids::TRANSLATION_MISSING, Severity::Error),
                "{location}"
            );
            assert!(outcome.fixed, "{location}");
            assert_eq!(feature.location.to_string(), fixed);
        }
    }

    #[test]
    fn comparison_errors_do_not_block_fixes() {
        let mut feature = cds("1..3", Some("WK"));
        let outcome = run(fix_mode(), &mut feature, "atg");
        assert!(outcome.result.contains_with(ids::NO_STOP_CODON, Severity::Fix));
        assert!(outcome.result.contains_with(ids::TRANSLATION_MISMATCH, Severity::Error));
        assert_eq!(feature.location.to_string(), "1..>3");
        assert_eq!(feature.translation().as_deref(), Some("WK"));
    }

    /// The same feature described on the opposite strand of the reverse-complemented sequence.
    fn mirror(location: &CompoundLocation, length: i64) -> CompoundLocation {
        let segments = location
            .segments
            .iter()
            .rev()
            .map(|s| Location::range(length + 1 - s.end(), length + 1 - s.begin()))
            .collect();
        CompoundLocation::new(segments)
            .with_global_complement(!location.global_complement)
            .with_partial(location.right_partial, location.left_partial)
    }

    fn summary(outcome: &CdsOutcome) -> Vec<(&'static str, Severity)> {
        outcome.result.messages().iter().map(|m| (m.id, m.severity)).collect()
    }

    #[test]
    fn complement_strand_mirrors_forward() {
        for (location, sequence) in [
            ("1..9", "atgaaataa"),
            ("1..3", "atg"),
            ("1..>6", "atgtag"),
            ("5..8", "atggatga"),
            ("1..10", "atgaaatagc"),
            ("1..9", "aaaaaataa"),
            ("join(1..4,8..12)", "atgacccaatag"),
        ] {
            let length = sequence.len() as i64;
            let reversed: String = reverse_complement(sequence.as_bytes())
                .into_iter()
                .map(char::from)
                .collect();

            let mut forward = cds(location, None);
            let mut reverse = CdsFeature::new(mirror(&forward.location, length));
            assert!(reverse.location.strand().is_reverse());

            for config in [report_mode(), fix_mode()] {
                let forward_outcome = run(config.clone(), &mut forward, sequence);
                let reverse_outcome = run(config, &mut reverse, &reversed);
                assert_eq!(summary(&forward_outcome), summary(&reverse_outcome), "{location}");
                assert_eq!(forward_outcome.fixed, reverse_outcome.fixed, "{location}");
                assert_eq!(
                    forward_outcome.translation.map(|t| t.conceptual_translation().to_string()),
                    reverse_outcome.translation.map(|t| t.conceptual_translation().to_string()),
                    "{location}"
                );
                assert_eq!(reverse.location, mirror(&forward.location, length), "{location}");
            }
        }
    }

    #[test]
    fn pseudo_is_exempt() {
        let mut feature = cds("1..12", None).with_qualifier(qualifier::PSEUDO, None);
        let outcome = run(fix_mode(), &mut feature, "atgtagaaatag");
        assert!(outcome.result.is_empty());
        assert!(outcome.translation.is_none());

        let mut feature = cds("1..12", Some("MK")).with_qualifier(qualifier::PSEUDO, None);
        let outcome = run(report_mode(), &mut feature, "atgtagaaatag");
        assert_eq!(ids_of(&outcome), vec![ids::PSEUDO_TRANSLATION]);
        assert!(outcome.result.is_valid());
    }

    #[test]
    fn round_trip() {
        let coding = "atgaaacccgggtttcaataa";
        let sequence = format!("tt{}", reverse_complement(coding.as_bytes()).into_iter().map(char::from).collect::<String>());
        // 21 coding bases at 3..23 on the reverse strand, split in two exons
        let location = "complement(join(3..10,11..23))";

        let mut feature = cds(location, None);
        let outcome = run(report_mode(), &mut feature, &sequence);
        assert_eq!(ids_of(&outcome), vec![ids::TRANSLATION_MISSING]);
        let conceptual = outcome.translation.unwrap().conceptual_translation().to_string();
        assert_eq!(conceptual, "MKPGFQ");

        feature.set_qualifier(qualifier::TRANSLATION, Some(&conceptual));
        let outcome = run(report_mode(), &mut feature, &sequence);
        assert!(outcome.result.is_empty(), "{:?}", outcome.result);
    }

    #[test]
    fn frame_invariance() {
        let mut shifted = cds("<1..10", Some("MK")).with_qualifier(qualifier::CODON_START, Some("2"));
        let outcome = run(report_mode(), &mut shifted, "catgaaataa");
        assert!(outcome.result.is_empty(), "{:?}", outcome.result);

        let mut trimmed = cds("2..10", Some("MK"));
        let trimmed_outcome = run(report_mode(), &mut trimmed, "catgaaataa");
        assert_eq!(
            outcome.translation.unwrap().conceptual_translation(),
            trimmed_outcome.translation.unwrap().conceptual_translation()
        );
    }

    #[test]
    fn codon_start_requires_five_prime_partial() {
        let mut feature = cds("1..10", Some("MK")).with_qualifier(qualifier::CODON_START, Some("2"));
        let outcome = run(report_mode(), &mut feature, "catgaaataa");
        assert_eq!(ids_of(&outcome), vec![ids::CODON_START_NOT_PARTIAL]);

        run(fix_mode(), &mut feature, "catgaaataa");
        assert_eq!(feature.location.to_string(), "<1..10");
    }

    #[test]
    fn codon_start_out_of_range() {
        let mut feature = cds("1..9", Some("MK")).with_qualifier(qualifier::CODON_START, Some("4"));
        let outcome = run(fix_mode(), &mut feature, "atgaaataa");
        assert_eq!(ids_of(&outcome), vec![ids::CODON_START_OUT_OF_RANGE]);
        assert!(outcome.translation.is_none());
    }

    #[test]
    fn unparsable_codon_start_is_configuration_error() {
        let codes = GeneticCodes::ncbi();
        let entry = Entry::new(None, Sequence::from("atgaaataa"));
        let mut feature = cds("1..9", Some("MK")).with_qualifier(qualifier::CODON_START, Some("one"));
        let err = CdsTranslator::new(&codes, report_mode())
            .translate(&mut feature, &entry, &NoRemoteSequences)
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn unknown_table_is_configuration_error() {
        let codes = GeneticCodes::ncbi();
        let entry = Entry::new(None, Sequence::from("atgaaataa"));
        let mut feature = cds("1..9", Some("MK")).with_qualifier(qualifier::TRANSL_TABLE, Some("99"));
        let err = CdsTranslator::new(&codes, report_mode())
            .translate(&mut feature, &entry, &NoRemoteSequences)
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn no_start_codon() {
        let mut feature = cds("1..9", Some("KK"));
        let outcome = run(report_mode(), &mut feature, "aaaaaataa");
        assert_eq!(ids_of(&outcome), vec![ids::NO_START_CODON]);
        assert_eq!(outcome.result.messages()[0].params, vec!["aaa"]);

        run(fix_mode(), &mut feature, "aaaaaataa");
        assert_eq!(feature.location.to_string(), "<1..9");
    }

    #[test]
    fn alternative_start_translates_as_methionine() {
        let mut feature = cds("1..12", Some("MKL")).with_qualifier(qualifier::TRANSL_TABLE, Some("11"));
        let outcome = run(report_mode(), &mut feature, "gtgaaactgtaa");
        assert!(outcome.result.is_empty(), "{:?}", outcome.result);
    }

    #[test]
    fn start_residue_mismatch() {
        let mut feature = cds("1..12", Some("VKL")).with_qualifier(qualifier::TRANSL_TABLE, Some("11"));
        let outcome = run(report_mode(), &mut feature, "gtgaaactgtaa");
        assert_eq!(ids_of(&outcome), vec![ids::START_RESIDUE_MISMATCH]);
        assert_eq!(outcome.result.messages()[0].params, vec!["Val", "Met"]);

        let outcome = run(fix_mode(), &mut feature, "gtgaaactgtaa");
        assert!(outcome.result.contains_with(ids::START_RESIDUE_MISMATCH, Severity::Fix));
        assert_eq!(feature.translation().as_deref(), Some("MKL"));
    }

    #[test]
    fn trailing_residues_are_never_fixed() {
        let mut feature = cds("1..9", Some("MKQ"));
        let outcome = run(fix_mode(), &mut feature, "atgaaataa");
        assert_eq!(ids_of(&outcome), vec![ids::TRAILING_RESIDUES]);
        assert!(!outcome.fixed);
        assert_eq!(feature.translation().as_deref(), Some("MKQ"));
    }

    #[test]
    fn trailing_x_ignored_on_three_prime_partial() {
        // the last codon runs into padding
        let mut feature = cds("1..>9", Some("MK"));
        let outcome = run(report_mode(), &mut feature, "atgaaaa");
        assert!(outcome.result.is_empty(), "{:?}", outcome.result);
        assert_eq!(outcome.translation.unwrap().conceptual_translation(), "MKX");
    }

    #[test]
    fn general_mismatch() {
        let mut feature = cds("1..9", Some("MR"));
        let outcome = run(report_mode(), &mut feature, "atgaaataa");
        assert_eq!(ids_of(&outcome), vec![ids::TRANSLATION_MISMATCH]);
        assert_eq!(outcome.result.messages()[0].params, vec!["2", "1"]);

        let mut excused = cds("1..9", Some("MR")).with_qualifier(qualifier::EXCEPTION, None);
        let outcome = run(report_mode(), &mut excused, "atgaaataa");
        assert!(outcome.result.contains_with(ids::TRANSLATION_MISMATCH, Severity::Warning));
        assert!(outcome.result.is_valid());
    }

    #[test]
    fn missing_translation() {
        let mut feature = cds("1..9", None);
        let outcome = run(fix_mode(), &mut feature, "atgaaataa");
        assert_eq!(ids_of(&outcome), vec![ids::TRANSLATION_MISSING]);
    }

    #[test]
    fn multiple_terminal_stops_block_fixes() {
        let mut feature = cds("1..>12", Some("MK"));
        let before = feature.clone();
        let outcome = run(fix_mode(), &mut feature, "atgaaataatag");
        assert_eq!(
            ids_of(&outcome),
            vec![ids::MULTIPLE_STOP_CODONS, ids::STOP_CODON_3_PARTIAL]
        );
        assert_eq!(outcome.result.count(Severity::Error), 2);
        assert_eq!(outcome.result.fixes().count(), 0);
        assert!(!outcome.fixed);
        assert_eq!(feature, before);
    }

    #[test]
    fn disabled_fix_stays_an_error() {
        let config = TranslatorConfig {
            fix_mode: true,
            disabled_fixes: vec![FixKind::NoStopCodonMake3Partial],
            ..TranslatorConfig::default()
        };
        let mut feature = cds("1..3", Some("M"));
        let outcome = run(config, &mut feature, "atg");
        assert!(outcome.result.contains_with(ids::NO_STOP_CODON, Severity::Error));
        assert_eq!(feature.location.to_string(), "1..3");
    }

    #[test]
    fn reverse_strand_partiality() {
        let sequence: String = reverse_complement(b"atgaaa").into_iter().map(char::from).collect();
        let mut feature = cds("complement(1..6)", Some("MK"));
        let outcome = run(fix_mode(), &mut feature, &sequence);
        assert!(outcome.result.contains_with(ids::NO_STOP_CODON, Severity::Fix));
        assert_eq!(feature.location.to_string(), "complement(<1..6)");
        assert!(feature.location.is_three_prime_partial());
    }

    #[test]
    fn sequence_shorter_than_location() {
        let mut feature = cds("1..12", Some("MK"));
        let outcome = run(fix_mode(), &mut feature, "atgaaataa");
        assert_eq!(ids_of(&outcome), vec![ids::SEQUENCE_TOO_SHORT]);
        assert!(outcome.translation.is_none());
    }

    #[test]
    fn inverted_segment() {
        let mut feature = cds("9..1", Some("MK"));
        let outcome = run(report_mode(), &mut feature, "atgaaataa");
        assert_eq!(ids_of(&outcome), vec![ids::INVALID_RANGE]);

        let outcome = run(fix_mode(), &mut feature, "atgaaataa");
        assert!(outcome.result.contains_with(ids::INVALID_RANGE, Severity::Fix));
        assert!(outcome.result.is_valid());
        assert_eq!(feature.location.to_string(), "1..9");
    }

    #[test]
    fn entry_without_sequence() {
        let codes = GeneticCodes::ncbi();
        let mut feature = cds("1..9", Some("MK"));
        let outcome = CdsTranslator::new(&codes, report_mode())
            .translate(&mut feature, &Entry::default(), &NoRemoteSequences)
            .unwrap();
        assert_eq!(ids_of(&outcome), vec![ids::NO_SEQUENCE]);
    }

    #[test]
    fn remote_segments() {
        let codes = GeneticCodes::ncbi();
        let entry = Entry::new(Some("TEST1"), Sequence::from("atg"));
        let mut remote = RemoteSequences::new();
        remote.insert("AB000001.1", &Sequence::from("aaataa")).unwrap();
        let translator = CdsTranslator::new(&codes, report_mode());

        let mut feature = cds("join(1..3,AB000001.1:1..6)", Some("MK"));
        let outcome = translator.translate(&mut feature, &entry, &remote).unwrap();
        assert!(outcome.result.is_empty(), "{:?}", outcome.result);

        let outcome = translator
            .translate(&mut feature, &entry, &NoRemoteSequences)
            .unwrap();
        assert_eq!(ids_of(&outcome), vec![ids::REMOTE_SEQUENCE_MISSING]);
        assert!(outcome.result.is_valid());
    }

    #[test]
    fn selenocysteine_transl_except() {
        let mut feature = cds("1..12", Some("MUK"))
            .with_qualifier(qualifier::TRANSL_EXCEPT, Some("(pos:4..6,aa:Sec)"));
        let outcome = run(fix_mode(), &mut feature, "atgtgaaaataa");
        assert!(outcome.result.is_empty(), "{:?}", outcome.result);
    }

    #[test]
    fn malformed_exception_is_configuration_error() {
        let codes = GeneticCodes::ncbi();
        let entry = Entry::new(None, Sequence::from("atgaaataa"));
        let mut feature = cds("1..9", Some("MK")).with_qualifier(qualifier::CODON, Some("tga=Trp"));
        let err = CdsTranslator::new(&codes, report_mode())
            .translate(&mut feature, &entry, &NoRemoteSequences)
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
