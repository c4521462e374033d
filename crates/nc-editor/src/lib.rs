pub mod actions;
pub mod config;
pub mod history;
pub mod input;
pub mod interaction;
pub mod selection;
pub mod services;
pub mod session;
pub mod shortcuts;

pub use actions::{ExportedImage, GenerateOutcome, SessionError, SharedSession};
pub use config::SessionConfig;
pub use history::History;
pub use session::CanvasSession;
