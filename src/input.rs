//! JSON batch input and the batch runner.
//!
//! ```json
//! { "entries": [ { "accession": "AB000001", "sequence": "atg...",
//!     "features": [ { "location": "join(1..9,20..>31)",
//!                     "qualifiers": [ { "name": "translation", "value": "MK" } ] } ] } ] }
//! ```

use std::io::{BufReader, Read};

use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Error;
use crate::feature::{CdsFeature, Qualifier};
use crate::location::parser::parse_location;
use crate::sequence::{Entry, Sequence, SequenceProvider};
use crate::translator::CdsTranslator;
use crate::validation::Message;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchInput {
    pub entries: Vec<EntryRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryRecord {
    #[serde(default)]
    pub accession: Option<String>,
    #[serde(default)]
    pub sequence: Option<String>,
    #[serde(default)]
    pub features: Vec<FeatureRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub location: String,
    #[serde(default)]
    pub qualifiers: Vec<Qualifier>,
}

/// Parse a batch from plain JSON.
pub fn parse_batch<R: Read>(reader: R) -> Result<BatchInput, Error> {
    Ok(serde_json::from_reader(BufReader::new(reader))?)
}

/// Parse a batch from gzip-compressed JSON.
pub fn parse_batch_gz<R: Read>(reader: R) -> Result<BatchInput, Error> {
    parse_batch(GzDecoder::new(reader))
}

/// Per-feature outcome. `location` and `qualifiers` reflect any committed fixes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureReport {
    pub location: String,
    pub valid: bool,
    pub fixed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
    /// Set when the feature could not be processed at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conceptual_translation: Option<String>,
    pub qualifiers: Vec<Qualifier>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accession: Option<String>,
    pub features: Vec<FeatureReport>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub features: usize,
    pub valid: usize,
    pub invalid: usize,
    pub fixed: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub summary: BatchSummary,
    pub entries: Vec<EntryReport>,
}

/// Run every feature of every entry. A feature that fails with an error is
/// recorded and its siblings still run.
pub fn validate_batch(
    input: &BatchInput,
    translator: &CdsTranslator,
    provider: &dyn SequenceProvider,
) -> BatchReport {
    let mut summary = BatchSummary::default();
    let mut entries = Vec::with_capacity(input.entries.len());

    for record in &input.entries {
        let entry = Entry {
            accession: record.accession.clone(),
            sequence: record.sequence.as_deref().map(Sequence::from),
        };
        let features = record
            .features
            .iter()
            .map(|feature| {
                let report = validate_feature(feature, &entry, translator, provider);
                summary.features += 1;
                if report.error.is_some() {
                    summary.failed += 1;
                } else if report.valid {
                    summary.valid += 1;
                } else {
                    summary.invalid += 1;
                }
                if report.fixed {
                    summary.fixed += 1;
                }
                report
            })
            .collect();
        entries.push(EntryReport {
            accession: record.accession.clone(),
            features,
        });
    }

    debug!(?summary, "batch complete");
    BatchReport { summary, entries }
}

fn validate_feature(
    record: &FeatureRecord,
    entry: &Entry,
    translator: &CdsTranslator,
    provider: &dyn SequenceProvider,
) -> FeatureReport {
    let failed = |error: Error| {
        warn!(
            accession = entry.accession.as_deref().unwrap_or("-"),
            location = %record.location,
            %error,
            "feature not processed"
        );
        FeatureReport {
            location: record.location.clone(),
            valid: false,
            fixed: false,
            messages: Vec::new(),
            error: Some(error.to_string()),
            conceptual_translation: None,
            qualifiers: record.qualifiers.clone(),
        }
    };

    let location = match parse_location(&record.location) {
        Ok(location) => location,
        Err(error) => return failed(error),
    };
    let mut feature = CdsFeature {
        location,
        qualifiers: record.qualifiers.clone(),
    };

    match translator.translate(&mut feature, entry, provider) {
        Ok(outcome) => FeatureReport {
            location: feature.location.to_string(),
            valid: outcome.result.is_valid(),
            fixed: outcome.fixed,
            messages: outcome.result.messages().to_vec(),
            error: None,
            conceptual_translation: outcome
                .translation
                .map(|t| t.conceptual_translation().to_string()),
            qualifiers: feature.qualifiers,
        },
        Err(error) => failed(error),
    }
}
