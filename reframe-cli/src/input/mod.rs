//! Input handling module

pub mod chunk_reader;
pub mod glob_resolver;
pub mod replay;

pub use chunk_reader::{open_input, ChunkReader, DEFAULT_CHUNK_SIZE};
pub use glob_resolver::resolve_patterns;
pub use replay::{FileReplayer, StopHandle};
