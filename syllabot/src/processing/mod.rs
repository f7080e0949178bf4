mod builder;
mod chunker;
mod normalizer;

pub use builder::{BuiltCourse, DocumentBuilder, KindCounts};
pub use chunker::Chunker;
pub use normalizer::normalize;
