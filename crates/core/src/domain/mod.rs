pub mod artifact;
pub mod progress;
pub mod shop;
pub mod summary;
pub mod temperature;
