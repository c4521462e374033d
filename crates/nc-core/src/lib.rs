pub mod id;
pub mod layout;
pub mod model;
pub mod source;

pub use id::EntityId;
pub use layout::{AspectRatio, Viewport};
pub use model::*;
pub use source::{ImagePart, ImageSource};
