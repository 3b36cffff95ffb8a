use serde::{Deserialize, Serialize};

// ===== Service Request/Response Types =====

/// Request body for `/predict-salary`. The skill list is already normalized
/// (trimmed, lower-cased, order preserved) by the time it gets here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryPredictionRequest {
    pub rating: f64,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryPredictionResponse {
    /// Estimated salary in thousands per year.
    pub predicted_salary_k: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
}
