pub mod common;

pub use common::{CommonBuffer, UniformContext};
