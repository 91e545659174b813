pub mod chapters;
pub mod convert;
pub mod transcribe;
