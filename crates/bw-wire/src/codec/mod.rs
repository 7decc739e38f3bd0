//! Async frame parser and serialiser.

mod reader;
mod writer;

pub use reader::{read_frame, FrameReader};
