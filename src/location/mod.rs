//! Feature locations: single segments and compound (joined) locations.

pub mod parser;

use std::fmt;

use crate::strand::Strand;

/// Where a segment's bases come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SequenceSource {
    /// The entry that owns the feature.
    Local,
    /// Another sequence record, e.g. a contig of an assembly.
    Remote {
        accession: String,
        version: Option<u32>,
    },
}

impl fmt::Display for SequenceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => Ok(()),
            Self::Remote {
                accession,
                version: Some(version),
            } => write!(f, "{accession}.{version}"),
            Self::Remote {
                accession,
                version: None,
            } => write!(f, "{accession}"),
        }
    }
}

/// Coordinates of a single segment, 1-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Span {
    Range { begin: i64, end: i64 },
    /// A single nucleotide.
    Base(i64),
    /// Zero-width site between two adjacent bases (`before^after`).
    Between { before: i64, after: i64 },
}

impl Span {
    #[must_use]
    pub fn begin(&self) -> i64 {
        match *self {
            Self::Range { begin, .. } => begin,
            Self::Base(position) => position,
            Self::Between { before, .. } => before,
        }
    }

    #[must_use]
    pub fn end(&self) -> i64 {
        match *self {
            Self::Range { end, .. } => end,
            Self::Base(position) => position,
            Self::Between { after, .. } => after,
        }
    }

    /// Number of bases the span contributes; inverted ranges contribute none.
    #[must_use]
    pub fn len(&self) -> usize {
        match *self {
            Self::Range { begin, end } if end >= begin => (end - begin + 1) as usize,
            Self::Range { .. } | Self::Between { .. } => 0,
            Self::Base(_) => 1,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_inverted(&self) -> bool {
        matches!(*self, Self::Range { begin, end } if begin > end)
    }
}

/// One segment of a feature location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub source: SequenceSource,
    pub span: Span,
    pub complement: bool,
}

impl Location {
    #[must_use]
    pub fn range(begin: i64, end: i64) -> Self {
        Self {
            source: SequenceSource::Local,
            span: Span::Range { begin, end },
            complement: false,
        }
    }

    #[must_use]
    pub fn remote_range(accession: &str, version: Option<u32>, begin: i64, end: i64) -> Self {
        Self {
            source: SequenceSource::Remote {
                accession: accession.to_string(),
                version,
            },
            span: Span::Range { begin, end },
            complement: false,
        }
    }

    #[must_use]
    pub fn base(position: i64) -> Self {
        Self {
            source: SequenceSource::Local,
            span: Span::Base(position),
            complement: false,
        }
    }

    #[must_use]
    pub fn between(before: i64, after: i64) -> Self {
        Self {
            source: SequenceSource::Local,
            span: Span::Between { before, after },
            complement: false,
        }
    }

    /// Builder-style complement flag.
    #[must_use]
    pub fn complemented(mut self) -> Self {
        self.complement = true;
        self
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self.source, SequenceSource::Remote { .. })
    }

    #[must_use]
    pub fn begin(&self) -> i64 {
        self.span.begin()
    }

    #[must_use]
    pub fn end(&self) -> i64 {
        self.span.end()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.span.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// True for a local segment covering `position`.
    #[must_use]
    pub fn contains(&self, position: i64) -> bool {
        !self.is_remote()
            && !self.is_empty()
            && self.begin() <= position
            && position <= self.end()
    }

    fn fmt_with_markers(&self, f: &mut fmt::Formatter<'_>, left: bool, right: bool) -> fmt::Result {
        if self.complement {
            write!(f, "complement(")?;
        }
        if self.is_remote() {
            write!(f, "{}:", self.source)?;
        }
        let lt = if left { "<" } else { "" };
        let gt = if right { ">" } else { "" };
        match self.span {
            Span::Range { begin, end } => write!(f, "{lt}{begin}..{gt}{end}")?,
            Span::Base(position) => write!(f, "{lt}{gt}{position}")?,
            Span::Between { before, after } => write!(f, "{before}^{after}")?,
        }
        if self.complement {
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with_markers(f, false, false)
    }
}

/// An ordered list of segments with global complement and partiality flags.
///
/// `left_partial`/`right_partial` are genomic: `<` is rendered on the segment
/// holding the lowest position and `>` on the one holding the highest,
/// whatever the segment order. Use the 5'/3' accessors for biological
/// partiality.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompoundLocation {
    pub segments: Vec<Location>,
    pub global_complement: bool,
    pub left_partial: bool,
    pub right_partial: bool,
}

impl CompoundLocation {
    #[must_use]
    pub fn new(segments: Vec<Location>) -> Self {
        Self {
            segments,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn single(location: Location) -> Self {
        Self::new(vec![location])
    }

    #[must_use]
    pub fn with_global_complement(mut self, complement: bool) -> Self {
        self.global_complement = complement;
        self
    }

    #[must_use]
    pub fn with_partial(mut self, left: bool, right: bool) -> Self {
        self.left_partial = left;
        self.right_partial = right;
        self
    }

    /// Smallest coordinate over all segments, regardless of segment order.
    #[must_use]
    pub fn min_position(&self) -> Option<i64> {
        self.segments
            .iter()
            .map(|s| s.begin().min(s.end()))
            .min()
    }

    /// Largest coordinate over all segments, regardless of segment order.
    #[must_use]
    pub fn max_position(&self) -> Option<i64> {
        self.segments
            .iter()
            .map(|s| s.begin().max(s.end()))
            .max()
    }

    /// First segment reaching down to `min_position`.
    fn lowest_segment(&self) -> Option<usize> {
        let min = self.min_position()?;
        self.segments.iter().position(|s| s.begin().min(s.end()) == min)
    }

    /// Last segment reaching up to `max_position`.
    fn highest_segment(&self) -> Option<usize> {
        let max = self.max_position()?;
        self.segments.iter().rposition(|s| s.begin().max(s.end()) == max)
    }

    /// Total number of bases over all segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.iter().map(Location::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn has_remote(&self) -> bool {
        self.segments.iter().any(Location::is_remote)
    }

    /// True when some local segment covers `position`.
    #[must_use]
    pub fn contains(&self, position: i64) -> bool {
        self.segments.iter().any(|s| s.contains(position))
    }

    /// Orientation of the feature. A location whose segments are all
    /// individually complemented reads on the reverse strand just like a
    /// globally complemented one; both together cancel out.
    #[must_use]
    pub fn strand(&self) -> Strand {
        let segments_reversed =
            !self.segments.is_empty() && self.segments.iter().all(|s| s.complement);
        Strand::from_complement(self.global_complement ^ segments_reversed)
    }

    #[must_use]
    pub fn is_five_prime_partial(&self) -> bool {
        if self.strand().is_reverse() {
            self.right_partial
        } else {
            self.left_partial
        }
    }

    #[must_use]
    pub fn is_three_prime_partial(&self) -> bool {
        if self.strand().is_reverse() {
            self.left_partial
        } else {
            self.right_partial
        }
    }

    pub fn set_five_prime_partial(&mut self, partial: bool) {
        if self.strand().is_reverse() {
            self.right_partial = partial;
        } else {
            self.left_partial = partial;
        }
    }

    pub fn set_three_prime_partial(&mut self, partial: bool) {
        if self.strand().is_reverse() {
            self.left_partial = partial;
        } else {
            self.right_partial = partial;
        }
    }

    /// Rewrite `complement(join(a,b))` as `join(complement(b),complement(a))`.
    ///
    /// Returns false (and leaves the location untouched) when there is no
    /// global complement, or when the segments carry mixed complement flags,
    /// since the rewrite would then change which genomic end is 5'.
    pub fn remove_global_complement(&mut self) -> bool {
        if !self.global_complement {
            return false;
        }
        let complemented = self.segments.iter().filter(|s| s.complement).count();
        if complemented != 0 && complemented != self.segments.len() {
            return false;
        }
        self.segments.reverse();
        for segment in &mut self.segments {
            segment.complement = !segment.complement;
        }
        self.global_complement = false;
        true
    }

    /// Indices of range segments whose begin lies after their end.
    #[must_use]
    pub fn inverted_segments(&self) -> Vec<usize> {
        self.segments
            .iter()
            .enumerate()
            .filter(|(_, s)| s.span.is_inverted())
            .map(|(i, _)| i)
            .collect()
    }

    /// Swap begin and end of every inverted range segment; returns how many changed.
    pub fn swap_inverted_segments(&mut self) -> usize {
        let mut swapped = 0;
        for segment in &mut self.segments {
            if let Span::Range { begin, end } = segment.span
                && begin > end
            {
                segment.span = Span::Range {
                    begin: end,
                    end: begin,
                };
                swapped += 1;
            }
        }
        swapped
    }
}

impl fmt::Display for CompoundLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.global_complement {
            write!(f, "complement(")?;
        }
        let joined = self.segments.len() > 1;
        if joined {
            write!(f, "join(")?;
        }
        let lowest = self.left_partial.then(|| self.lowest_segment()).flatten();
        let highest = self.right_partial.then(|| self.highest_segment()).flatten();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            segment.fmt_with_markers(f, lowest == Some(i), highest == Some(i))?;
        }
        if joined {
            write!(f, ")")?;
        }
        if self.global_complement {
            write!(f, ")")?;
        }
        Ok(())
    }
}
