//! Parser for EMBL/GenBank location notation.
//!
//! Handles `a..b`, single bases, `a^b` sites, `<`/`>` partial markers,
//! remote segments `ACC.V:a..b`, `join(...)` and `complement(...)` at both the
//! segment and the outermost level.

use std::str::FromStr;

use crate::error::Error;

use super::{CompoundLocation, Location, SequenceSource, Span};

impl FromStr for CompoundLocation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_location(s)
    }
}

/// Parse a feature location such as `complement(join(<1..516,609..>1621))`.
pub fn parse_location(content: &str) -> Result<CompoundLocation, Error> {
    let s: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    if s.is_empty() {
        return Err(Error::Parse("empty location".to_string()));
    }

    let (global_complement, body) = match unwrap_call(&s, "complement") {
        Some(inner) if inner.starts_with("join(") => (true, inner),
        Some(inner) if split_top_level(inner).len() == 1 && !inner.contains('(') => (true, inner),
        _ => (false, s.as_str()),
    };

    let elements = if let Some(inner) = unwrap_call(body, "join") {
        split_top_level(inner)
    } else if body.starts_with("order(") {
        return Err(Error::Parse(format!(
            "order() locations cannot be translated: '{content}'"
        )));
    } else {
        vec![body]
    };

    let mut location = CompoundLocation {
        global_complement,
        ..CompoundLocation::default()
    };
    let mut markers = Vec::with_capacity(elements.len());
    for element in elements {
        if element.is_empty() {
            return Err(Error::Parse(format!("empty segment in location: '{content}'")));
        }
        let (segment, left, right) = parse_element(element)?;
        markers.push((left, right));
        location.segments.push(segment);
    }

    // Partiality is kept per genomic end, so markers must sit on the extremes.
    let (min, max) = (location.min_position(), location.max_position());
    for (segment, (left, right)) in location.segments.iter().zip(markers) {
        if left && Some(segment.begin().min(segment.end())) != min {
            return Err(Error::Parse(format!(
                "'<' is not on the lowest position of location: '{content}'"
            )));
        }
        if right && Some(segment.begin().max(segment.end())) != max {
            return Err(Error::Parse(format!(
                "'>' is not on the highest position of location: '{content}'"
            )));
        }
        location.left_partial |= left;
        location.right_partial |= right;
    }
    Ok(location)
}

/// Return the argument of `name(...)` when `s` is exactly one such call.
fn unwrap_call<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    let inner = s.strip_prefix(name)?.strip_prefix('(')?.strip_suffix(')')?;
    // Reject "complement(1..2),complement(3..4)" style inputs whose first
    // parenthesis closes before the end.
    let mut depth = 0i32;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            _ => {}
        }
    }
    (depth == 0).then_some(inner)
}

/// Split on commas that are not nested inside parentheses.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

/// Parse one join element; returns the segment and its `<`/`>` markers.
fn parse_element(element: &str) -> Result<(Location, bool, bool), Error> {
    if let Some(inner) = unwrap_call(element, "complement") {
        let (mut segment, left, right) = parse_element(inner)?;
        segment.complement = !segment.complement;
        return Ok((segment, left, right));
    }
    if element.contains('(') {
        return Err(Error::Parse(format!("unsupported location element: '{element}'")));
    }

    let (source, span_text) = match element.rsplit_once(':') {
        Some((accession, span_text)) => (parse_source(accession)?, span_text),
        None => (SequenceSource::Local, element),
    };

    let (span, left, right) = parse_span(span_text)?;
    Ok((
        Location {
            source,
            span,
            complement: false,
        },
        left,
        right,
    ))
}

fn parse_source(accession: &str) -> Result<SequenceSource, Error> {
    if accession.is_empty() {
        return Err(Error::Parse("empty accession in remote location".to_string()));
    }
    let (accession, version) = match accession.rsplit_once('.') {
        Some((acc, v)) => {
            let version = v
                .parse()
                .map_err(|e| Error::Parse(format!("invalid accession version '{v}': {e}")))?;
            (acc, Some(version))
        }
        None => (accession, None),
    };
    Ok(SequenceSource::Remote {
        accession: accession.to_string(),
        version,
    })
}

fn parse_span(s: &str) -> Result<(Span, bool, bool), Error> {
    if let Some((before, after)) = s.split_once('^') {
        let before = parse_position(before)?;
        let after = parse_position(after)?;
        return Ok((Span::Between { before, after }, false, false));
    }

    if let Some((begin, end)) = s.split_once("..") {
        let (left, begin) = match begin.strip_prefix('<') {
            Some(rest) => (true, rest),
            None => (false, begin),
        };
        let (right, end) = match end.strip_prefix('>') {
            Some(rest) => (true, rest),
            None => (false, end),
        };
        let span = Span::Range {
            begin: parse_position(begin)?,
            end: parse_position(end)?,
        };
        return Ok((span, left, right));
    }

    let (left, right, position) = if let Some(rest) = s.strip_prefix('<') {
        (true, false, rest)
    } else if let Some(rest) = s.strip_prefix('>') {
        (false, true, rest)
    } else {
        (false, false, s)
    };
    Ok((Span::Base(parse_position(position)?), left, right))
}

fn parse_position(s: &str) -> Result<i64, Error> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::Parse(format!("invalid location position: '{s}'")));
    }
    s.parse()
        .map_err(|e| Error::Parse(format!("invalid location position '{s}': {e}")))
}
