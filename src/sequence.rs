//! Nucleotide sequences, entries and the remote sequence provider.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read};

use flate2::read::GzDecoder;

use crate::error::Error;

/// Immutable nucleotide sequence addressed with 1-based coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    bases: Vec<u8>,
}

impl Sequence {
    /// Build from raw bases; whitespace and digits (flat-file line numbering) are dropped.
    #[must_use]
    pub fn new(bases: &[u8]) -> Self {
        Self {
            bases: bases
                .iter()
                .copied()
                .filter(|b| !b.is_ascii_whitespace() && !b.is_ascii_digit())
                .collect(),
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bases
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

impl From<&str> for Sequence {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

/// A sequence record: the owner of the bases that local feature locations index into.
#[derive(Debug, Clone, Default)]
pub struct Entry {
    pub accession: Option<String>,
    pub sequence: Option<Sequence>,
}

impl Entry {
    #[must_use]
    pub fn new(accession: Option<&str>, sequence: Sequence) -> Self {
        Self {
            accession: accession.map(str::to_string),
            sequence: Some(sequence),
        }
    }
}

/// IUPAC complement, preserving case. `U` complements to `A`; unknown symbols pass through.
#[must_use]
pub fn complement_base(b: u8) -> u8 {
    let complement = match b.to_ascii_uppercase() {
        b'A' => b'T',
        b'C' => b'G',
        b'G' => b'C',
        b'T' | b'U' => b'A',
        b'R' => b'Y',
        b'Y' => b'R',
        b'K' => b'M',
        b'M' => b'K',
        b'B' => b'V',
        b'V' => b'B',
        b'D' => b'H',
        b'H' => b'D',
        other => other,
    };
    if b.is_ascii_lowercase() {
        complement.to_ascii_lowercase()
    } else {
        complement
    }
}

#[must_use]
pub fn reverse_complement(bases: &[u8]) -> Vec<u8> {
    bases.iter().rev().map(|&b| complement_base(b)).collect()
}

/// Supplies the bases of remote location segments.
///
/// Fail-fast: implementations return [`Error::MissingRemoteSequence`] instead
/// of retrying.
pub trait SequenceProvider {
    fn fetch(&self, accession: &str, version: Option<u32>) -> Result<&[u8], Error>;
}

/// Provider for entries that must not reference other records.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRemoteSequences;

impl SequenceProvider for NoRemoteSequences {
    fn fetch(&self, accession: &str, version: Option<u32>) -> Result<&[u8], Error> {
        Err(Error::MissingRemoteSequence(versioned(accession, version)))
    }
}

/// In-memory remote sequence dictionary keyed by `accession.version` or bare accession.
#[derive(Debug, Clone, Default)]
pub struct RemoteSequences {
    sequences: HashMap<String, Vec<u8>>,
}

fn versioned(accession: &str, version: Option<u32>) -> String {
    match version {
        Some(version) => format!("{accession}.{version}"),
        None => accession.to_string(),
    }
}

impl RemoteSequences {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sequence; duplicate IDs are rejected.
    pub fn insert(&mut self, id: &str, sequence: &Sequence) -> Result<(), Error> {
        if self.sequences.contains_key(id) {
            return Err(Error::Parse(format!("duplicate remote sequence ID: {id}")));
        }
        self.sequences
            .insert(id.to_string(), sequence.as_bytes().to_vec());
        Ok(())
    }

    /// Build from a gzip-compressed FASTA file.
    pub fn from_fasta_gz<R: Read>(reader: R) -> Result<Self, Error> {
        Self::from_fasta(BufReader::new(GzDecoder::new(reader)))
    }

    /// Build from FASTA; the ID is the first whitespace-delimited header token.
    pub fn from_fasta<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut remote = Self::new();
        let mut current: Option<(String, Vec<u8>)> = None;

        for line in reader.lines() {
            let line = line?;
            if let Some(header) = line.strip_prefix('>') {
                if let Some((id, bases)) = current.take() {
                    remote.insert(&id, &Sequence::new(&bases))?;
                }
                let id = header.split_whitespace().next().unwrap_or("");
                if id.is_empty() {
                    return Err(Error::Parse(format!("empty FASTA header: {line}")));
                }
                current = Some((id.to_string(), Vec::new()));
            } else if let Some((_, bases)) = current.as_mut() {
                bases.extend_from_slice(line.trim().as_bytes());
            }
        }

        if let Some((id, bases)) = current {
            remote.insert(&id, &Sequence::new(&bases))?;
        }
        Ok(remote)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

impl SequenceProvider for RemoteSequences {
    fn fetch(&self, accession: &str, version: Option<u32>) -> Result<&[u8], Error> {
        let key = versioned(accession, version);
        self.sequences
            .get(&key)
            .or_else(|| self.sequences.get(accession))
            .map(Vec::as_slice)
            .ok_or(Error::MissingRemoteSequence(key))
    }
}
