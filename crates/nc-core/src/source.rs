//! Image sources: opaque references to decoded pixel data.
//!
//! A source is usually a `data:` URI produced by reading an uploaded file.
//! The helpers here split such a URI into its media type and payload so the
//! scene's images can be handed to collaborators that want raw parts.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;
use winnow::prelude::*;
use winnow::token::{rest, take_till};

/// Media type assumed when a data URI does not name one.
pub const FALLBACK_MIME: &str = "image/png";

/// Shared, immutable reference to an image. Cloning is a refcount bump, so
/// every history snapshot can carry its sources without copying pixel data.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ImageSource(Arc<str>);

impl ImageSource {
    pub fn new(uri: impl Into<Arc<str>>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split a `data:` URI into an [`ImagePart`]. Returns `None` for any
    /// other kind of URI.
    pub fn to_part(&self) -> Option<ImagePart> {
        let mut input = self.as_str();
        let uri = parse_data_uri.parse_next(&mut input).ok()?;
        Some(ImagePart {
            mime_type: uri.mime.unwrap_or(FALLBACK_MIME).to_string(),
            data: uri.payload.to_string(),
        })
    }
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Data URIs run to megabytes; show only the head.
        let s = self.as_str();
        match s.char_indices().nth(32) {
            Some((cut, _)) => write!(f, "ImageSource({}…)", &s[..cut]),
            None => write!(f, "ImageSource({s})"),
        }
    }
}

impl Serialize for ImageSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ImageSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ImageSource::new(s))
    }
}

/// An encoded image payload plus its media type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePart {
    pub mime_type: String,
    /// Encoded payload exactly as it appeared in the URI (base64 for
    /// `;base64` URIs).
    pub data: String,
}

// ─── Data URI parser ─────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
struct DataUri<'a> {
    mime: Option<&'a str>,
    payload: &'a str,
}

/// `data:[<mime>][;param]*,<payload>`
///
/// The media type only counts when a `;` parameter follows it; a bare
/// `data:image/png,...` falls back to [`FALLBACK_MIME`] like an absent one.
fn parse_data_uri<'a>(input: &mut &'a str) -> ModalResult<DataUri<'a>> {
    (
        "data:",
        take_till(0.., |c: char| c == ';' || c == ','),
        take_till(0.., ','),
        ',',
        rest,
    )
        .map(|(_, mime, params, _, payload): (_, &'a str, &'a str, _, &'a str)| {
            let mime = (params.starts_with(';') && !mime.is_empty()).then_some(mime);
            DataUri { mime, payload }
        })
        .parse_next(input)
}
