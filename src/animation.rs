pub mod progress;
pub mod spring;
