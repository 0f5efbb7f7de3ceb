//! Named fixes and the proposed-edit record committed at the end of a pass.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::feature::{CdsFeature, qualifier};
use crate::location::CompoundLocation;

/// A correction the translator can apply in fix mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FixKind {
    #[serde(rename = "fixSwapInvertedSegment")]
    SwapInvertedSegment,
    #[serde(rename = "fixCodonStartNotOneMake5Partial")]
    CodonStartNotOneMake5Partial,
    #[serde(rename = "fixNonMultipleOfThreeMake3And5Partial")]
    NonMultipleOfThreeMake3And5Partial,
    #[serde(rename = "fixNoStartCodonMake5Partial")]
    NoStartCodonMake5Partial,
    #[serde(rename = "fixValidStopCodonRemove3Partial")]
    ValidStopCodonRemove3Partial,
    #[serde(rename = "fixNoStopCodonMake3Partial")]
    NoStopCodonMake3Partial,
    #[serde(rename = "fixInternalStopCodonMakePseudo")]
    InternalStopCodonMakePseudo,
    #[serde(rename = "fixTranslationStartResidue")]
    TranslationStartResidue,
}

impl FixKind {
    pub const ALL: [FixKind; 8] = [
        Self::SwapInvertedSegment,
        Self::CodonStartNotOneMake5Partial,
        Self::NonMultipleOfThreeMake3And5Partial,
        Self::NoStartCodonMake5Partial,
        Self::ValidStopCodonRemove3Partial,
        Self::NoStopCodonMake3Partial,
        Self::InternalStopCodonMakePseudo,
        Self::TranslationStartResidue,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SwapInvertedSegment => "fixSwapInvertedSegment",
            Self::CodonStartNotOneMake5Partial => "fixCodonStartNotOneMake5Partial",
            Self::NonMultipleOfThreeMake3And5Partial => "fixNonMultipleOfThreeMake3And5Partial",
            Self::NoStartCodonMake5Partial => "fixNoStartCodonMake5Partial",
            Self::ValidStopCodonRemove3Partial => "fixValidStopCodonRemove3Partial",
            Self::NoStopCodonMake3Partial => "fixNoStopCodonMake3Partial",
            Self::InternalStopCodonMakePseudo => "fixInternalStopCodonMakePseudo",
            Self::TranslationStartResidue => "fixTranslationStartResidue",
        }
    }
}

impl fmt::Display for FixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Changes proposed during one translation pass.
///
/// Nothing touches the feature until [`FeatureEdit::commit`], so a pass that
/// ends in an error leaves the feature exactly as it was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureEdit {
    location: Option<CompoundLocation>,
    translation: Option<String>,
    make_pseudo: bool,
}

impl FeatureEdit {
    pub fn set_location(&mut self, location: CompoundLocation) {
        self.location = Some(location);
    }

    pub fn replace_translation(&mut self, translation: String) {
        self.translation = Some(translation);
    }

    /// Mark the feature pseudo and drop its translation.
    pub fn make_pseudo(&mut self) {
        self.make_pseudo = true;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.translation.is_none() && !self.make_pseudo
    }

    /// Apply every proposed change; returns false when there was nothing to do.
    pub fn commit(self, feature: &mut CdsFeature) -> bool {
        if self.is_empty() {
            return false;
        }
        if let Some(location) = self.location {
            feature.location = location;
        }
        if self.make_pseudo {
            feature.remove_qualifier(qualifier::TRANSLATION);
            if !feature.is_pseudo() {
                feature.set_qualifier(qualifier::PSEUDO, None);
            }
        } else if let Some(translation) = self.translation {
            feature.set_qualifier(qualifier::TRANSLATION, Some(&translation));
        }
        true
    }
}
