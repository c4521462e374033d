//! Canvas frame geometry: the viewport the collage is composed in and the
//! aspect-ratio presets that shape it.

use crate::model::Point;
use serde::{Deserialize, Serialize};

/// Canvas dimensions in canvas-local units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::for_aspect(800.0, AspectRatio::default())
    }
}

impl Viewport {
    /// A viewport `width` units wide whose height follows `ratio`.
    pub fn for_aspect(width: f32, ratio: AspectRatio) -> Self {
        let (w, h) = ratio.parts();
        Self {
            width,
            height: width * h / w,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Frame shapes offered for the collage canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectRatio {
    #[default]
    Square,
    Widescreen,
    SocialStory,
    Classic,
    Traditional,
}

impl AspectRatio {
    pub const PRESETS: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Widescreen,
        AspectRatio::SocialStory,
        AspectRatio::Classic,
        AspectRatio::Traditional,
    ];

    /// `(width, height)` proportions.
    pub const fn parts(self) -> (f32, f32) {
        match self {
            AspectRatio::Square => (1.0, 1.0),
            AspectRatio::Widescreen => (16.0, 9.0),
            AspectRatio::SocialStory => (9.0, 16.0),
            AspectRatio::Classic => (4.0, 3.0),
            AspectRatio::Traditional => (3.0, 4.0),
        }
    }

    /// Label shown in the frame picker.
    pub const fn label(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1 (Square)",
            AspectRatio::Widescreen => "16:9 (Widescreen)",
            AspectRatio::SocialStory => "9:16 (Social Story)",
            AspectRatio::Classic => "4:3 (Classic)",
            AspectRatio::Traditional => "3:4 (Traditional)",
        }
    }

    /// Look up a preset by its `w/h` value string (e.g. `"16/9"`).
    pub fn from_value(value: &str) -> Option<Self> {
        Self::PRESETS.into_iter().find(|r| r.value() == value)
    }

    pub fn value(self) -> &'static str {
        match self {
            AspectRatio::Square => "1/1",
            AspectRatio::Widescreen => "16/9",
            AspectRatio::SocialStory => "9/16",
            AspectRatio::Classic => "4/3",
            AspectRatio::Traditional => "3/4",
        }
    }
}
