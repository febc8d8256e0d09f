use std::path::{Path, PathBuf};

use crate::{
    errors::StatementResult,
    inter::prelude::{InterBalanceRaw, InterTransactionRaw},
    types::StatementRequest,
};

/// Where statements come from.
pub trait StatementSource {
    fn fetch_pdf(&self, request: &StatementRequest) -> StatementResult<Vec<u8>>;

    fn fetch_transactions(
        &self,
        request: &StatementRequest,
    ) -> StatementResult<Vec<InterTransactionRaw>>;

    /// Balance as of `date` (`YYYY-MM-DD`).
    fn fetch_balance(&self, date: &str) -> StatementResult<InterBalanceRaw>;
}

/// Remote storage for generated artifacts. Returns the remote file id.
pub trait ArtifactUploader {
    fn upload(&self, path: &Path) -> StatementResult<String>;
}

pub trait ArtifactMailer {
    fn send(&self, subject: &str, attachments: &[PathBuf]) -> StatementResult<()>;
}
