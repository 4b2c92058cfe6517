use serde_json::{json, Value};

pub fn build_prompt(document_text: &str, question: &str) -> String {
    format!(
        r#"You are an expert at answering questions about documents. You will be given the content of a document and a question. Your job is to answer the question based on the information in the document.

INSTRUCTIONS:
1. Answer the question using ONLY the information in the document content below
2. If the document does not contain enough information to answer, say so clearly
3. Do not add information that is not present in the document
4. If a passage of the document supports your answer, copy it word for word into "snippet"; otherwise leave "snippet" out
5. Reply with a JSON object of the form {{"answer": "...", "snippet": "..."}}

Document Content:
{document_text}

Question:
{question}

Answer:"#
    )
}

/// Gemini `responseSchema` matching [`crate::models::Answer`].
pub fn answer_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "answer": {
                "type": "STRING",
                "description": "The answer to the question, extracted from the document."
            },
            "snippet": {
                "type": "STRING",
                "description": "A relevant snippet from the document that supports the answer."
            }
        },
        "required": ["answer"]
    })
}
