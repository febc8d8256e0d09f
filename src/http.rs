use reqwest::blocking::{Client, ClientBuilder, Response};

use crate::errors::{StatementError, StatementResult};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub(crate) fn client_builder() -> ClientBuilder {
    Client::builder().user_agent(USER_AGENT)
}

pub(crate) fn client() -> StatementResult<Client> {
    Ok(client_builder().build()?)
}

/// Turns a non-2xx response into [`StatementError::Api`], keeping the body for the report.
pub(crate) fn ensure_success(
    service: &'static str,
    response: Response,
) -> StatementResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    tracing::warn!(service, status = status.as_u16(), "request rejected");
    Err(StatementError::Api {
        service,
        status: status.as_u16(),
        body,
    })
}
