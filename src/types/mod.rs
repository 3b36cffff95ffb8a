pub mod job;
pub mod response;

pub use job::JobRecord;
pub use response::{SalaryPredictionRequest, SalaryPredictionResponse, UploadResponse};
