use std::{fs, path::Path};

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{StatementError, StatementResult},
    http::{client, ensure_success},
    traits::ArtifactUploader,
};

pub const DRIVE_UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files?uploadType=multipart";

const SERVICE: &str = "Google Drive";

/// `{"access_token": "...", "folder_id": "..."}`; `folder_id` is optional.
#[derive(Clone, Deserialize)]
pub struct DriveCredentials {
    pub access_token: String,
    #[serde(default)]
    pub folder_id: Option<String>,
}

impl DriveCredentials {
    pub fn load(path: &Path) -> StatementResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[derive(Debug, Serialize)]
struct FileMetadata<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    parents: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct CreatedFile {
    #[serde(default)]
    id: Option<String>,
}

pub struct DriveUploader {
    http: Client,
    credentials: DriveCredentials,
}

impl DriveUploader {
    pub fn new(credentials: DriveCredentials) -> StatementResult<Self> {
        Ok(Self {
            http: client()?,
            credentials,
        })
    }

    fn metadata<'a>(&'a self, name: &'a str) -> FileMetadata<'a> {
        FileMetadata {
            name,
            parents: self.credentials.folder_id.as_deref().into_iter().collect(),
        }
    }
}

/// `multipart/related` body: JSON metadata part followed by the raw file part.
fn multipart_body(metadata: &str, content: &[u8], boundary: &str) -> Vec<u8> {
    let mut body = Vec::with_capacity(content.len() + metadata.len() + 256);
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
    body.extend_from_slice(metadata.as_bytes());
    body.extend_from_slice(format!("\r\n--{boundary}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

impl ArtifactUploader for DriveUploader {
    fn upload(&self, path: &Path) -> StatementResult<String> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let content = fs::read(path)?;
        let metadata = serde_json::to_string(&self.metadata(name))?;
        let boundary = format!("inter-statement-{}", Uuid::new_v4().simple());

        tracing::info!(file = name, bytes = content.len(), "uploading to Google Drive");
        let response = self
            .http
            .post(DRIVE_UPLOAD_URL)
            .bearer_auth(&self.credentials.access_token)
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={boundary}"),
            )
            .body(multipart_body(&metadata, &content, &boundary))
            .send()?;

        let created: CreatedFile = ensure_success(SERVICE, response)?.json()?;
        created.id.ok_or(StatementError::MissingFileId)
    }
}
