//! Resolves a compound location into the linear nucleotide sequence used for translation.

use crate::error::Error;
use crate::location::{CompoundLocation, Location, SequenceSource};
use crate::sequence::{Sequence, SequenceProvider, reverse_complement};

/// Placeholder base for positions outside the available sequence.
pub const PADDING_BASE: u8 = b'n';

/// Where one segment landed in the concatenated (pre-global-complement) sequence.
#[derive(Debug, Clone)]
struct SegmentLayout {
    local: bool,
    begin: i64,
    end: i64,
    complement: bool,
    offset: usize,
    len: usize,
}

/// The linear coding sequence of a feature plus the bookkeeping needed to map
/// linear positions back to genomic coordinates.
#[derive(Debug, Clone)]
pub struct ResolvedSequence {
    bases: Vec<u8>,
    layout: Vec<SegmentLayout>,
    global_complement: bool,
    padded_left: usize,
    padded_right: usize,
}

impl ResolvedSequence {
    #[must_use]
    pub fn bases(&self) -> &[u8] {
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

    /// Bases padded for positions before 1.
    #[must_use]
    pub fn padded_left(&self) -> usize {
        self.padded_left
    }

    /// Bases padded for positions past the end of their sequence.
    #[must_use]
    pub fn padded_right(&self) -> usize {
        self.padded_right
    }

    /// 0-based index in the linear sequence of a local genomic position.
    #[must_use]
    pub fn linear_index(&self, position: i64) -> Option<usize> {
        let segment = self
            .layout
            .iter()
            .find(|s| s.local && s.len > 0 && s.begin <= position && position <= s.end)?;
        let within = if segment.complement {
            segment.end - position
        } else {
            position - segment.begin
        } as usize;
        let index = segment.offset + within;
        Some(if self.global_complement {
            self.bases.len() - 1 - index
        } else {
            index
        })
    }

    /// Local genomic position of a 0-based linear index; `None` for remote bases.
    #[must_use]
    pub fn genomic_position(&self, index: usize) -> Option<i64> {
        if index >= self.bases.len() {
            return None;
        }
        let index = if self.global_complement {
            self.bases.len() - 1 - index
        } else {
            index
        };
        let segment = self
            .layout
            .iter()
            .find(|s| s.offset <= index && index < s.offset + s.len)?;
        if !segment.local {
            return None;
        }
        let within = (index - segment.offset) as i64;
        Some(if segment.complement {
            segment.end - within
        } else {
            segment.begin + within
        })
    }
}

/// Concatenate the segments of `location` in list order.
///
/// Each complemented segment contributes its reverse complement; the global
/// complement is applied afterwards to the assembled sequence as a whole.
/// Positions outside the available sequence are padded with [`PADDING_BASE`].
pub fn resolve(
    location: &CompoundLocation,
    sequence: &Sequence,
    provider: &dyn SequenceProvider,
) -> Result<ResolvedSequence, Error> {
    let mut bases = Vec::with_capacity(location.len());
    let mut layout = Vec::with_capacity(location.segments.len());
    let mut padded_left = 0;
    let mut padded_right = 0;

    for segment in &location.segments {
        if segment.span.is_inverted() {
            return Err(Error::Parse(format!(
                "segment begin after end: {segment}"
            )));
        }
        let source = match &segment.source {
            SequenceSource::Local => sequence.as_bytes(),
            SequenceSource::Remote { accession, version } => provider.fetch(accession, *version)?,
        };
        let (piece, left, right) = extract(segment, source);
        padded_left += left;
        padded_right += right;

        layout.push(SegmentLayout {
            local: !segment.is_remote(),
            begin: segment.begin(),
            end: segment.end(),
            complement: segment.complement,
            offset: bases.len(),
            len: piece.len(),
        });
        if segment.complement {
            bases.extend(reverse_complement(&piece));
        } else {
            bases.extend(piece);
        }
    }

    if location.global_complement {
        bases = reverse_complement(&bases);
    }

    Ok(ResolvedSequence {
        bases,
        layout,
        global_complement: location.global_complement,
        padded_left,
        padded_right,
    })
}

/// Forward-strand bases of one segment with leading/trailing padding counts.
fn extract(segment: &Location, source: &[u8]) -> (Vec<u8>, usize, usize) {
    let span_len = segment.len() as i64;
    if span_len == 0 {
        return (Vec::new(), 0, 0);
    }
    let (begin, end) = (segment.begin(), segment.end());
    let available = source.len() as i64;

    let lead = (1 - begin).clamp(0, span_len);
    let trail = (end - available).clamp(0, span_len - lead);
    let inner_begin = begin.max(1);
    let inner_end = end.min(available);

    let mut piece = Vec::with_capacity(span_len as usize);
    piece.resize(lead as usize, PADDING_BASE);
    if inner_begin <= inner_end {
        piece.extend_from_slice(&source[(inner_begin - 1) as usize..inner_end as usize]);
    }
    piece.resize(piece.len() + trail as usize, PADDING_BASE);
    (piece, lead as usize, trail as usize)
}
