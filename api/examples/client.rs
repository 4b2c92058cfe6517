use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::{json, Value};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let pdf_path = args.next().ok_or("usage: client <file.pdf> [question]")?;
    let question = args
        .next()
        .unwrap_or_else(|| "What is the main topic?".to_string());
    let base_url = env::var("DOCUQUERY_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());

    let client = Client::new();

    println!("Health check:");
    let health: Value = client
        .get(format!("{}/health", base_url))
        .send()
        .await?
        .json()
        .await?;
    println!("{}", serde_json::to_string_pretty(&health)?);

    let created: Value = client
        .post(format!("{}/sessions", base_url))
        .send()
        .await?
        .json()
        .await?;
    let id = created["session"]["id"]
        .as_str()
        .ok_or("server did not return a session id")?
        .to_string();
    println!("\nSession {}", id);

    let bytes = tokio::fs::read(&pdf_path).await?;
    let filename = std::path::Path::new(&pdf_path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload.pdf".to_string());
    let form = Form::new().part(
        "file",
        Part::bytes(bytes)
            .file_name(filename)
            .mime_str("application/pdf")?,
    );

    println!("\nUpload:");
    let upload = client
        .post(format!("{}/sessions/{}/document", base_url, id))
        .multipart(form)
        .send()
        .await?;
    println!("Status: {}", upload.status());
    let upload_json: Value = upload.json().await?;
    println!("{}", serde_json::to_string_pretty(&upload_json["notification"])?);

    println!("\nQuestion: {}", question);
    let answer: Value = client
        .post(format!("{}/sessions/{}/questions", base_url, id))
        .json(&json!({ "question": question }))
        .send()
        .await?
        .json()
        .await?;
    println!("{}", serde_json::to_string_pretty(&answer)?);

    Ok(())
}
