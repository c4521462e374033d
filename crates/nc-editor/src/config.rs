//! Session configuration.

use nc_core::layout::AspectRatio;
use nc_core::model::{DEFAULT_WIDTH, MIN_SIZE};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::Duration;

/// Tunables for a [`CanvasSession`](crate::session::CanvasSession).
///
/// Deserializes from a partial map: any field left out keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Width of a freshly placed image. Default: **250**.
    pub default_width: f32,

    /// Smallest width or height a resize may produce. Default: **50**.
    pub min_size: f32,

    /// Pause between clearing the selection and capturing the canvas, so
    /// the capture is free of selection decoration. Default: **100 ms**.
    /// Serialized as whole milliseconds.
    #[serde(rename = "settleDelayMs", with = "millis")]
    pub settle_delay: Duration,

    /// Canvas width in canvas units; height follows `aspect_ratio`.
    /// Default: **800**.
    pub canvas_width: f32,

    pub aspect_ratio: AspectRatio,

    /// Bind ⌘⇧Z / ⌘Y to redo. Redo is always available programmatically.
    /// Default: **false**.
    pub bind_redo: bool,

    /// Suggested file name for a saved collage. Default: `nano-collage.png`.
    pub export_file_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_width: DEFAULT_WIDTH,
            min_size: MIN_SIZE,
            settle_delay: Duration::from_millis(100),
            canvas_width: 800.0,
            aspect_ratio: AspectRatio::default(),
            bind_redo: false,
            export_file_name: "nano-collage.png".to_string(),
        }
    }
}

mod millis {
    use super::*;

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
