use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::{
    builder::OfxBuilder,
    errors::StatementResult,
    traits::{ArtifactMailer, ArtifactUploader, StatementSource},
    types::StatementRequest,
};

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub pdf_path: PathBuf,
    pub ofx_path: PathBuf,
    pub transaction_count: usize,
    pub uploaded_ids: Vec<String>,
    pub emailed: bool,
}

/// Fetch → convert → persist → upload → email, one step at a time.
///
/// Each step runs once; the first failure aborts the run.
pub struct StatementPipeline {
    source: Box<dyn StatementSource>,
    uploader: Option<Box<dyn ArtifactUploader>>,
    mailer: Option<Box<dyn ArtifactMailer>>,
    output_dir: PathBuf,
    generated_on: Option<NaiveDate>,
}

impl StatementPipeline {
    pub fn new(source: impl StatementSource + 'static, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: Box::new(source),
            uploader: None,
            mailer: None,
            output_dir: output_dir.into(),
            generated_on: None,
        }
    }

    pub fn uploader(mut self, uploader: impl ArtifactUploader + 'static) -> Self {
        self.uploader = Some(Box::new(uploader));
        self
    }

    pub fn mailer(mut self, mailer: impl ArtifactMailer + 'static) -> Self {
        self.mailer = Some(Box::new(mailer));
        self
    }

    pub fn generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = Some(date);
        self
    }

    pub fn run(&self, request: &StatementRequest) -> StatementResult<RunReport> {
        fs::create_dir_all(&self.output_dir)?;

        let base_name = request.base_name();
        let pdf_path = self.output_dir.join(format!("{base_name}.pdf"));
        let ofx_path = self.output_dir.join(format!("{base_name}.ofx"));

        tracing::info!(start = %request.start_date, end = %request.end_date, "fetching statement");
        let pdf = self.source.fetch_pdf(request)?;
        let raw_transactions = self.source.fetch_transactions(request)?;
        let balance = self.source.fetch_balance(request.end_date.as_str())?;
        let transaction_count = raw_transactions.len();
        tracing::info!(
            transactions = transaction_count,
            pdf_bytes = pdf.len(),
            "statement fetched"
        );

        let ofx = OfxBuilder::new()
            .raw_transactions(raw_transactions)
            .balance(balance)
            .request(request.clone())
            .generated_on(self.generated_on.unwrap_or_else(|| Local::now().date_naive()))
            .build();

        save_file(&pdf_path, &pdf)?;
        save_file(&ofx_path, &ofx)?;

        let artifacts = vec![pdf_path.clone(), ofx_path.clone()];

        let uploaded_ids = match &self.uploader {
            Some(uploader) => artifacts
                .iter()
                .map(|path| -> StatementResult<String> {
                    let id = uploader.upload(path)?;
                    tracing::info!(file = %path.display(), id = %id, "uploaded");
                    Ok(id)
                })
                .collect::<StatementResult<Vec<_>>>()?,
            None => {
                tracing::info!("no uploader configured, skipping upload");
                Vec::new()
            }
        };

        let emailed = match &self.mailer {
            Some(mailer) => {
                let subject = format!("Extrato {} - {}", request.start_date, request.end_date);
                mailer.send(&subject, &artifacts)?;
                tracing::info!(subject = %subject, "email sent");
                true
            }
            None => {
                tracing::info!("no mailer configured, skipping email");
                false
            }
        };

        Ok(RunReport {
            pdf_path,
            ofx_path,
            transaction_count,
            uploaded_ids,
            emailed,
        })
    }
}

fn save_file(path: &Path, content: &[u8]) -> StatementResult<()> {
    fs::write(path, content)?;
    tracing::info!(file = %path.display(), bytes = content.len(), "saved");
    Ok(())
}
