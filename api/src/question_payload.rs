use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct QuestionPayload {
    #[serde(default)]
    pub question: String,
}
