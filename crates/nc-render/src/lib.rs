pub mod hit;

pub use hit::{Hit, hit_test};
