//! Reading resume and job description text from PDF, plain text and Markdown files

pub mod file_detector;
pub mod manager;
pub mod text_extractor;

pub use manager::InputManager;
