use serde::Serialize;

/// Acknowledgement body for favorites mutations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
