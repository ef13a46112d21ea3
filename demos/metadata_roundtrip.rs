//! Storing encryption metadata next to dotenv content.
//!
//! Run with: cargo run --example metadata_roundtrip

use serde::{Deserialize, Serialize};
use serde_flatenv::dotenv::{emit_document, load_document, Document, Entry};
use serde_flatenv::{flatten, from_value, to_value, FlatOptions};
use std::error::Error;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct AgeRecipient {
    recipient: String,
    enc: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Metadata {
    age: Vec<AgeRecipient>,
    lastmodified: String,
    mac: String,
    version: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let metadata = Metadata {
        age: vec![AgeRecipient {
            recipient: "age1ql3z7hjy54pw3hyww5ayyfg7zqgvc7w3j2elw8zmrj2kg5sfn9aqmcac8p".to_string(),
            enc: "-----BEGIN AGE ENCRYPTED FILE-----\nYWdlLWVuY3J5cHRpb24\n-----END AGE ENCRYPTED FILE-----\n"
                .to_string(),
        }],
        lastmodified: "2024-03-01T09:00:00Z".to_string(),
        mac: "ENC[AES256_GCM,data:Zm9v,type:str]".to_string(),
        version: "3.8.1".to_string(),
    };

    let metadata_value = to_value(&metadata)?;
    println!("Flat metadata:");
    for (key, value) in flatten(&metadata_value) {
        println!("  {} -> {}", key, value);
    }
    println!();

    let document = Document {
        entries: vec![
            Entry::new("DATABASE_URL", "ENC[AES256_GCM,data:cG9zdGdyZXM=,type:str]"),
            Entry::new("API_TOKEN", "ENC[AES256_GCM,data:dG9rZW4=,type:str]"),
        ],
        metadata: metadata_value,
    };

    let options = FlatOptions::default();
    let text = emit_document(&document, &options)?;
    println!("Document on disk:\n{}", text);

    let loaded = load_document(&text, &options)?;
    let metadata_back: Metadata = from_value(loaded.metadata)?;
    println!("Entries read back: {}", loaded.entries.len());
    println!("Metadata survived: {}", metadata_back == metadata);

    Ok(())
}
