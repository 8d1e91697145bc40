// Infrastructure layer
pub mod scanner;
pub mod staleness;
pub mod compressor;
pub mod merger;
pub mod cleanup;
pub mod processors;

pub use scanner::*;
pub use staleness::*;
pub use compressor::*;
pub use merger::*;
pub use cleanup::*;
pub use processors::*;
