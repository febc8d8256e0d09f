use thiserror::Error;

/// Erros possíveis durante a obtenção, conversão e entrega de extratos
#[derive(Error, Debug)]
pub enum StatementError {
    /// Falha de leitura ou escrita em disco (credenciais, PDF, OFX)
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// JSON inválido em arquivo de credenciais ou resposta de API
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Falha de transporte HTTP (conexão, TLS, corpo da resposta)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// O PDF do extrato veio com base64 inválido
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// A API respondeu com status diferente de 2xx
    #[error("{service} returned HTTP {status}: {body}")]
    Api {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Resposta do endpoint OAuth sem `access_token`
    #[error("Access token not found in Banco Inter response")]
    MissingToken,

    /// Resposta de exportação sem o campo `pdf`
    #[error("Statement PDF not found in Banco Inter response")]
    MissingPdf,

    /// Resposta de upload sem o identificador do arquivo criado
    #[error("Uploaded file id not found in Google Drive response")]
    MissingFileId,

    // ── Validação de entrada (fora do gerador OFX) ──────────────────────────────

    /// Data fora do formato YYYY-MM-DD ou inexistente no calendário
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Data inicial posterior à data final
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: String, end: String },

    /// Envio de e-mail configurado sem nenhum destinatário
    #[error("At least one email recipient is required")]
    MissingRecipients,
}

/// Alias conveniente para Result com nosso tipo de erro principal
pub type StatementResult<T> = Result<T, StatementError>;
