//! Input processing module
//! Handles file detection, upload validation and job description extraction

pub mod file_detector;
pub mod manager;
pub mod text_extractor;
pub mod validator;

pub use manager::InputManager;
pub use validator::validate;
