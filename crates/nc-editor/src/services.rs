//! Collaborator interfaces.
//!
//! The session never decodes pixels, rasterizes the canvas, or talks to a
//! generative backend itself. Hosts plug those in through the traits below;
//! each call is asynchronous and may fail with a [`ServiceError`].

use nc_core::layout::Viewport;
use nc_core::model::Scene;
use nc_core::source::{ImagePart, ImageSource};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Failure reported by a collaborator. The message is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceError {
    pub message: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ─── Payloads ────────────────────────────────────────────────────────────

/// A raw file offered by upload or drop, before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResource {
    pub name: String,
    /// Media type reported by the host (`image/png`, `text/plain`, ...).
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileResource {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Only `image/*` files are placed on the canvas.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// Result of decoding a file: a renderable reference and its pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub source: ImageSource,
    pub width: u32,
    pub height: u32,
}

impl DecodedImage {
    /// Natural width / height, or `None` for a zero dimension.
    pub fn aspect_ratio(&self) -> Option<f32> {
        (self.width > 0 && self.height > 0).then(|| self.width as f32 / self.height as f32)
    }
}

/// An encoded raster image (canvas capture or generated result).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub mime_type: String,
    /// Encoded image payload (base64).
    pub data: String,
}

impl RasterImage {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// `data:` URI for hosts that display or download the image directly.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

// ─── Traits ──────────────────────────────────────────────────────────────

/// Turns a raw file into a renderable image with known dimensions.
pub trait ImageDecoder {
    fn decode(&self, file: &FileResource) -> impl Future<Output = Result<DecodedImage, ServiceError>>;
}

/// Rasterizes the rendered canvas.
pub trait SnapshotCapture {
    /// Wait for the host to re-render (selection decoration removed, layout
    /// settled) before capturing.
    fn settle(&self, delay: Duration) -> impl Future<Output = ()>;

    fn capture(
        &self,
        scene: &Scene,
        viewport: &Viewport,
    ) -> impl Future<Output = Result<RasterImage, ServiceError>>;
}

/// Merges a canvas capture into a new image following a prompt.
pub trait ImageGenerator {
    /// `Ok(None)` means the service answered without producing an image.
    fn generate(
        &self,
        image: &RasterImage,
        prompt: &str,
    ) -> impl Future<Output = Result<Option<RasterImage>, ServiceError>>;
}

/// Writes a prompt idea from the images on the canvas.
pub trait PromptSuggester {
    /// `images` is never empty.
    fn suggest(&self, images: &[ImagePart]) -> impl Future<Output = Result<String, ServiceError>>;
}
