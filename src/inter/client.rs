use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{
    Identity,
    blocking::{Client, RequestBuilder},
};
use serde::de::DeserializeOwned;

use super::{
    credentials::BankCredentials,
    dto::{InterBalanceRaw, InterPdfRaw, InterStatementRaw, InterTokenRaw, InterTransactionRaw},
};
use crate::{
    errors::{StatementError, StatementResult},
    http::{client_builder, ensure_success},
    traits::StatementSource,
    types::StatementRequest,
};

pub const TOKEN_URL: &str = "https://cdpj.partners.bancointer.com.br/oauth/v2/token";
pub const API_BASE_URL: &str = "https://cdpj.partners.bancointer.com.br/banking/v2";

const SERVICE: &str = "Banco Inter";
const STATEMENT_SCOPE: &str = "extrato.read";
const ACCOUNT_HEADER: &str = "x-conta-corrente";

/// Blocking Banco Inter client holding one OAuth token for its lifetime.
pub struct InterClient {
    http: Client,
    token: String,
    account: Option<String>,
    base_url: String,
}

impl InterClient {
    /// Builds the mutual-TLS client and exchanges the credentials for a token.
    pub fn connect(credentials: &BankCredentials) -> StatementResult<Self> {
        let identity = Identity::from_pem(&credentials.identity_pem()?)?;
        let http = client_builder().identity(identity).build()?;

        tracing::info!(client_id = %credentials.client_id, "requesting Banco Inter token");
        let response = http
            .post(TOKEN_URL)
            .form(&token_form(credentials))
            .send()?;
        let token: InterTokenRaw = ensure_success(SERVICE, response)?.json()?;
        let token = token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(StatementError::MissingToken)?;

        Ok(Self {
            http,
            token,
            account: credentials.conta.clone(),
            base_url: API_BASE_URL.to_string(),
        })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token);

        match &self.account {
            Some(account) => request.header(ACCOUNT_HEADER, account),
            None => request,
        }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> StatementResult<T> {
        tracing::debug!(path, "GET");
        let response = self.get(path).query(query).send()?;
        Ok(ensure_success(SERVICE, response)?.json()?)
    }
}

fn token_form(credentials: &BankCredentials) -> [(&'static str, &str); 4] {
    [
        ("client_id", credentials.client_id.as_str()),
        ("client_secret", credentials.client_secret.as_str()),
        ("scope", STATEMENT_SCOPE),
        ("grant_type", "client_credentials"),
    ]
}

fn range_query(request: &StatementRequest) -> [(&'static str, &str); 2] {
    [
        ("dataInicio", request.start_date.as_str()),
        ("dataFim", request.end_date.as_str()),
    ]
}

fn decode_pdf(raw: InterPdfRaw) -> StatementResult<Vec<u8>> {
    let encoded = raw.pdf.ok_or(StatementError::MissingPdf)?;
    Ok(STANDARD.decode(encoded.trim())?)
}

impl StatementSource for InterClient {
    fn fetch_pdf(&self, request: &StatementRequest) -> StatementResult<Vec<u8>> {
        let raw: InterPdfRaw = self.get_json("/extrato/exportar", &range_query(request))?;
        decode_pdf(raw)
    }

    fn fetch_transactions(
        &self,
        request: &StatementRequest,
    ) -> StatementResult<Vec<InterTransactionRaw>> {
        let raw: InterStatementRaw = self.get_json("/extrato", &range_query(request))?;
        Ok(raw.transactions)
    }

    fn fetch_balance(&self, date: &str) -> StatementResult<InterBalanceRaw> {
        self.get_json("/saldo", &[("dataSaldo", date)])
    }
}
