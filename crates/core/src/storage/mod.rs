pub mod artifacts;
pub mod atomic;
pub mod progress;

pub use artifacts::ArtifactStore;
pub use progress::ProgressFile;
