//! Marker-delimited region replacement
//!
//! A region runs from the first occurrence of its start marker to the first
//! occurrence of its end marker. Splicing replaces the region and the single
//! character following the end marker.

use thiserror::Error;

/// Start/end token pair delimiting one replaceable region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPair {
    /// Opening token
    pub start: String,
    /// Closing token
    pub end: String,
}

impl MarkerPair {
    /// Create a marker pair
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Surround `body` with this pair's tokens
    #[must_use]
    pub fn wrap(&self, body: &str) -> String {
        format!("{}{}{}", self.start, body, self.end)
    }
}

/// The two regions rewritten in a README
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    /// Region holding the entry count
    pub counter: MarkerPair,
    /// Region holding the grouped entry listing
    pub entries: MarkerPair,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            counter: MarkerPair::new("<!-- counter start -->", "<!-- counter end -->"),
            entries: MarkerPair::new("<!-- entries start -->", "<!-- entries end -->"),
        }
    }
}

/// Errors raised when a region cannot be located
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpliceError {
    /// A marker token does not occur in the document
    #[error("Marker not found: {marker}")]
    MissingMarker {
        /// The token that was searched for
        marker: String,
    },

    /// The end marker occurs before the start marker
    #[error("End marker {end} precedes start marker {start}")]
    OutOfOrder {
        /// The opening token
        start: String,
        /// The closing token
        end: String,
    },
}

/// Byte range from the start marker through the end of the end marker
fn locate(document: &str, markers: &MarkerPair) -> Result<(usize, usize), SpliceError> {
    let start = document
        .find(&markers.start)
        .ok_or_else(|| SpliceError::MissingMarker {
            marker: markers.start.clone(),
        })?;
    let end = document
        .find(&markers.end)
        .ok_or_else(|| SpliceError::MissingMarker {
            marker: markers.end.clone(),
        })?;

    if end < start {
        return Err(SpliceError::OutOfOrder {
            start: markers.start.clone(),
            end: markers.end.clone(),
        });
    }

    Ok((start, end + markers.end.len()))
}

/// Replace the marked region of `document` with `replacement`
///
/// The replaced span also swallows the one character right after the end
/// marker, if there is one. `replacement` is expected to carry fresh markers.
///
/// # Errors
///
/// Returns `SpliceError` if a marker is missing or the markers are reversed.
pub fn splice(
    document: &str,
    markers: &MarkerPair,
    replacement: &str,
) -> Result<String, SpliceError> {
    let (start, end) = locate(document, markers)?;
    let tail = document[end..]
        .chars()
        .next()
        .map_or(end, |c| end + c.len_utf8());

    let mut out = String::with_capacity(document.len() + replacement.len());
    out.push_str(&document[..start]);
    out.push_str(replacement);
    out.push_str(&document[tail..]);
    Ok(out)
}

/// The marked region of `document`, markers included
///
/// # Errors
///
/// Returns `SpliceError` if a marker is missing or the markers are reversed.
pub fn relocate<'a>(document: &'a str, markers: &MarkerPair) -> Result<&'a str, SpliceError> {
    let (start, end) = locate(document, markers)?;
    Ok(&document[start..end])
}
