//! Session actions that call out to collaborators.
//!
//! Actions run on a [`SharedSession`], a cloneable single-threaded handle.
//! The session is borrowed only for the synchronous steps around each
//! collaborator call, so pointer and key events keep flowing while a decode,
//! capture or generation is pending. After every await the action borrows
//! again and reads the live state at that moment.
//!
//! Each action checks its preconditions before contacting anything. Failures
//! are logged and returned; they never leave a partial commit.

use crate::services::{
    FileResource, ImageDecoder, ImageGenerator, PromptSuggester, RasterImage, ServiceError,
    SnapshotCapture,
};
use crate::session::CanvasSession;
use nc_core::id::EntityId;
use nc_core::model::Point;
use nc_core::source::ImagePart;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use thiserror::Error;

/// User-facing failure of a session action. `Display` is the notice text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Please add at least one image and a prompt to generate.")]
    MissingPromptOrImages,

    #[error("Please add some images to the canvas first.")]
    NoImages,

    #[error("Could not capture the canvas: {0}")]
    Capture(#[source] ServiceError),

    #[error("{0}")]
    Generation(#[source] ServiceError),

    #[error("{0}")]
    Suggestion(#[source] ServiceError),
}

/// What a generation request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    Image(RasterImage),
    /// The service answered but returned no image.
    NoImage,
}

impl GenerateOutcome {
    pub const NO_IMAGE_NOTICE: &'static str =
        "The generator did not return an image. Please try a different prompt.";
}

/// A captured collage ready for the host to save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub image: RasterImage,
    pub file_name: String,
}

/// Shared handle to a [`CanvasSession`] for hosts that route input and run
/// collaborator actions on the same thread.
///
/// Input handlers call [`borrow_mut`](Self::borrow_mut) for the length of
/// one event. Async actions never hold a borrow across an await.
#[derive(Default)]
pub struct SharedSession {
    inner: Rc<RefCell<CanvasSession>>,
}

// Manual Clone: clones share one session.
impl Clone for SharedSession {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl From<CanvasSession> for SharedSession {
    fn from(session: CanvasSession) -> Self {
        Self::new(session)
    }
}

impl SharedSession {
    pub fn new(session: CanvasSession) -> Self {
        Self {
            inner: Rc::new(RefCell::new(session)),
        }
    }

    /// Panics if an input handler on this thread still holds the session
    /// mutably.
    pub fn borrow(&self) -> Ref<'_, CanvasSession> {
        self.inner.borrow()
    }

    /// Panics if the session is already borrowed on this thread.
    pub fn borrow_mut(&self) -> RefMut<'_, CanvasSession> {
        self.inner.borrow_mut()
    }

    /// Decode `file` and place it centred on `at` (canvas centre when
    /// `None`). Non-image files and decode failures add nothing. The image
    /// lands on top of whatever the scene holds once decoding finishes.
    pub async fn add_image<D: ImageDecoder>(
        &self,
        decoder: &D,
        file: &FileResource,
        at: Option<Point>,
    ) -> Option<EntityId> {
        if !file.is_image() {
            log::debug!("skipping non-image file {} ({})", file.name, file.mime_type);
            return None;
        }
        match decoder.decode(file).await {
            Ok(decoded) => self.borrow_mut().place_image(&decoded, at),
            Err(e) => {
                log::warn!("decode of {} failed, image dropped: {e}", file.name);
                None
            }
        }
    }

    /// Files picked through the upload control: the selection is cleared and
    /// every image lands at the canvas centre.
    pub async fn upload_files<D: ImageDecoder>(
        &self,
        decoder: &D,
        files: &[FileResource],
    ) -> Vec<EntityId> {
        self.borrow_mut().clear_selection();
        self.add_all(decoder, files, None).await
    }

    /// Files dropped on the canvas at (x, y): ends the drag-over hover,
    /// clears the selection, and centres every image on the drop point.
    pub async fn drop_files<D: ImageDecoder>(
        &self,
        decoder: &D,
        files: &[FileResource],
        x: f32,
        y: f32,
    ) -> Vec<EntityId> {
        {
            let mut session = self.borrow_mut();
            session.drag_leave();
            session.clear_selection();
        }
        self.add_all(decoder, files, Some(Point::new(x, y))).await
    }

    /// Capture the canvas as a file for saving.
    pub async fn export_collage<C: SnapshotCapture>(
        &self,
        capture: &C,
    ) -> Result<ExportedImage, SessionError> {
        let image = self.capture(capture).await?;
        Ok(ExportedImage {
            image,
            file_name: self.borrow().config.export_file_name.clone(),
        })
    }

    /// Capture the canvas and ask `generator` to merge it following `prompt`.
    pub async fn generate<C: SnapshotCapture, G: ImageGenerator>(
        &self,
        capture: &C,
        generator: &G,
        prompt: &str,
    ) -> Result<GenerateOutcome, SessionError> {
        if prompt.trim().is_empty() || self.borrow().live.is_empty() {
            return Err(SessionError::MissingPromptOrImages);
        }

        let snapshot = self.capture(capture).await?;
        match generator.generate(&snapshot, prompt).await {
            Ok(Some(image)) => Ok(GenerateOutcome::Image(image)),
            Ok(None) => {
                log::info!("generation returned no image");
                Ok(GenerateOutcome::NoImage)
            }
            Err(e) => {
                log::error!("generation failed: {e}");
                Err(SessionError::Generation(e))
            }
        }
    }

    /// Ask `suggester` for a prompt idea based on every image on the canvas.
    pub async fn suggest_prompt<S: PromptSuggester>(
        &self,
        suggester: &S,
    ) -> Result<String, SessionError> {
        let parts = self.borrow().image_parts();
        if parts.is_empty() {
            return Err(SessionError::NoImages);
        }
        suggester.suggest(&parts).await.map_err(|e| {
            log::error!("prompt suggestion failed: {e}");
            SessionError::Suggestion(e)
        })
    }

    async fn add_all<D: ImageDecoder>(
        &self,
        decoder: &D,
        files: &[FileResource],
        at: Option<Point>,
    ) -> Vec<EntityId> {
        let mut added = Vec::with_capacity(files.len());
        for file in files {
            if let Some(id) = self.add_image(decoder, file, at).await {
                added.push(id);
            }
        }
        added
    }

    /// Clear the selection, let the host settle, then rasterize the scene
    /// as it is after the wait.
    async fn capture<C: SnapshotCapture>(&self, capture: &C) -> Result<RasterImage, SessionError> {
        let delay = {
            let mut session = self.borrow_mut();
            session.clear_selection();
            session.config.settle_delay
        };
        capture.settle(delay).await;

        let (scene, viewport) = {
            let session = self.borrow();
            (session.live.clone(), session.viewport)
        };
        capture
            .capture(&scene, &viewport)
            .await
            .map_err(|e: ServiceError| {
                log::error!("canvas capture failed: {e}");
                SessionError::Capture(e)
            })
    }
}

impl CanvasSession {
    /// Encoded payloads of the scene's images, in scene order. Sources that
    /// are not data URIs are skipped.
    pub fn image_parts(&self) -> Vec<ImagePart> {
        self.live
            .iter()
            .filter_map(|img| {
                let part = img.source.to_part();
                if part.is_none() {
                    log::warn!("{:?} has no inline data; left out of suggestion", img.id);
                }
                part
            })
            .collect()
    }
}
