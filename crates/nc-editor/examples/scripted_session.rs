//! Drive a canvas session through a short scripted edit with stub
//! collaborators, printing the session view after each step.
//!
//!     RUST_LOG=debug cargo run -p nc-editor --example scripted_session

use nc_core::{ImagePart, ImageSource, Scene, Viewport};
use nc_editor::{CanvasSession, SharedSession};
use nc_editor::input::{KeyEvent, Modifiers};
use nc_editor::services::{
    DecodedImage, FileResource, ImageDecoder, ImageGenerator, PromptSuggester, RasterImage,
    ServiceError, SnapshotCapture,
};
use std::time::Duration;

/// Treats the file body as `"<width>x<height>"`.
struct TextDecoder;

impl ImageDecoder for TextDecoder {
    async fn decode(&self, file: &FileResource) -> Result<DecodedImage, ServiceError> {
        let text = std::str::from_utf8(&file.bytes).map_err(|e| ServiceError::new(e.to_string()))?;
        let (w, h) = text
            .split_once('x')
            .ok_or_else(|| ServiceError::new(format!("{}: expected <w>x<h>", file.name)))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|e| ServiceError::new(format!("{}: {e}", file.name)))
        };
        Ok(DecodedImage {
            source: ImageSource::new(format!("data:{};base64,{}", file.mime_type, file.name)),
            width: parse(w)?,
            height: parse(h)?,
        })
    }
}

/// "Rasterizes" by describing the scene.
struct DescribeCapture;

impl SnapshotCapture for DescribeCapture {
    async fn settle(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }

    async fn capture(&self, scene: &Scene, viewport: &Viewport) -> Result<RasterImage, ServiceError> {
        Ok(RasterImage::new(
            "text/plain",
            format!("{} images on {}x{}", scene.len(), viewport.width, viewport.height),
        ))
    }
}

struct EchoGenerator;

impl ImageGenerator for EchoGenerator {
    async fn generate(
        &self,
        image: &RasterImage,
        prompt: &str,
    ) -> Result<Option<RasterImage>, ServiceError> {
        Ok(Some(RasterImage::new(
            image.mime_type.clone(),
            format!("{} / {prompt}", image.data),
        )))
    }
}

struct CountingSuggester;

impl PromptSuggester for CountingSuggester {
    async fn suggest(&self, images: &[ImagePart]) -> Result<String, ServiceError> {
        Ok(format!("Arrange these {} pictures as a travel poster", images.len()))
    }
}

fn show(step: &str, session: &CanvasSession) {
    let history = session.history();
    println!(
        "{step:<12} history {}/{}  {}",
        history.cursor() + 1,
        history.len(),
        session.view_json()
    );
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    let session = SharedSession::default();
    let files = [
        FileResource::new("beach.png", "image/png", b"640x480".to_vec()),
        FileResource::new("notes.txt", "text/plain", b"not an image".to_vec()),
        FileResource::new("sunset.png", "image/png", b"480x640".to_vec()),
    ];
    let ids = session.upload_files(&TextDecoder, &files).await;
    show("upload", &session.borrow());

    {
        let mut canvas = session.borrow_mut();
        // Move the first image 120 units left.
        let Some(first) = ids.first().and_then(|id| canvas.scene().get(*id)) else {
            eprintln!("nothing was placed");
            return;
        };
        let (cx, cy) = (first.x + first.width / 2.0, first.y + first.height / 2.0);
        canvas.handle_pointer_down(1, cx, cy, Modifiers::NONE);
        canvas.handle_pointer_move(1, cx - 120.0, cy);
        canvas.handle_pointer_up(1, cx - 120.0, cy);
        show("drag", &canvas);

        canvas.handle_key(&KeyEvent::new("Delete", Modifiers::NONE));
        show("delete", &canvas);

        canvas.handle_key(&KeyEvent::new("z", Modifiers { meta: true, ..Modifiers::NONE }));
        show("undo", &canvas);
    }

    match session.suggest_prompt(&CountingSuggester).await {
        Ok(prompt) => {
            println!("suggested: {prompt}");
            match session.generate(&DescribeCapture, &EchoGenerator, &prompt).await {
                Ok(outcome) => println!("generated: {outcome:?}"),
                Err(e) => eprintln!("generation failed: {e}"),
            }
        }
        Err(e) => eprintln!("suggestion failed: {e}"),
    }

    match session.export_collage(&DescribeCapture).await {
        Ok(export) => println!("export {} ({})", export.file_name, export.image.data),
        Err(e) => eprintln!("export failed: {e}"),
    }
}
