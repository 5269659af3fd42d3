pub mod password;
pub mod upload;

pub use upload::{StagedFile, UploadOutcome, UploadService};
