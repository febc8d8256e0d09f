use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{lenient_amount, lenient_text};
use crate::ofx::prelude::OfxDate;

/// One entry of `GET /banking/v2/extrato`.
///
/// Every field is optional and untyped so that a sparse or odd record still
/// produces a transaction. Fields not listed here are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterTransactionRaw {
    #[serde(rename = "tipoOperacao", default, skip_serializing_if = "Option::is_none")]
    pub operation_code: Option<Value>,
    #[serde(rename = "dataEntrada", default, skip_serializing_if = "Option::is_none")]
    pub entry_date: Option<Value>,
    #[serde(rename = "valor", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
}

impl InterTransactionRaw {
    pub fn operation_code(&self) -> Option<&str> {
        self.operation_code.as_ref().and_then(Value::as_str)
    }

    pub fn posted_date(&self) -> OfxDate {
        match &self.entry_date {
            Some(Value::String(date)) => date.as_str().into(),
            _ => OfxDate::default(),
        }
    }

    pub fn amount(&self) -> Decimal {
        lenient_amount(self.value.as_ref())
    }

    pub fn description(&self) -> String {
        lenient_text(self.description.as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct InterStatementRaw {
    #[serde(rename = "transacoes", default)]
    pub(crate) transactions: Vec<InterTransactionRaw>,
}

/// Response of `GET /banking/v2/saldo`; only the available balance is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterBalanceRaw {
    #[serde(rename = "disponivel", default, skip_serializing_if = "Option::is_none")]
    pub available: Option<Value>,
}

impl InterBalanceRaw {
    pub fn available(&self) -> Decimal {
        lenient_amount(self.available.as_ref())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct InterPdfRaw {
    #[serde(default)]
    pub(crate) pdf: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InterTokenRaw {
    #[serde(default)]
    pub(crate) access_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_statement_deserializes_transaction_list() {
        let statement: InterStatementRaw = serde_json::from_value(json!({
            "transacoes": [
                {"tipoOperacao": "C", "dataEntrada": "2024-03-01", "valor": "150.00", "descricao": "Pix"},
                {"tipoOperacao": "D", "dataEntrada": "2024-03-02", "valor": "20.00"},
                {}
            ]
        }))
        .unwrap();

        assert_eq!(statement.transactions.len(), 3);
        assert_eq!(statement.transactions[0].operation_code(), Some("C"));
        assert_eq!(statement.transactions[1].description(), "");
        assert_eq!(statement.transactions[2].operation_code(), None);
    }

    #[test]
    fn test_statement_without_list_is_empty() {
        let statement: InterStatementRaw = serde_json::from_value(json!({})).unwrap();
        assert!(statement.transactions.is_empty());
    }

    #[test]
    fn test_non_string_operation_code_is_not_credit() {
        let raw: InterTransactionRaw = serde_json::from_value(json!({"tipoOperacao": 1})).unwrap();
        assert_eq!(raw.operation_code(), None);
    }

    #[test]
    fn test_non_string_date_is_empty() {
        let raw: InterTransactionRaw =
            serde_json::from_value(json!({"dataEntrada": 20240301})).unwrap();
        assert_eq!(raw.posted_date(), OfxDate::default());
    }

    #[test]
    fn test_raw_transaction_serialization_skips_missing_fields() {
        let raw = InterTransactionRaw {
            operation_code: Some(json!("C")),
            ..Default::default()
        };

        let json = serde_json::to_string(&raw).unwrap();
        assert_eq!(json, r#"{"tipoOperacao":"C"}"#);
    }

    #[test]
    fn test_token_response() {
        let token: InterTokenRaw = serde_json::from_value(json!({
            "access_token": "abc",
            "token_type": "Bearer",
            "expires_in": 3600
        }))
        .unwrap();
        assert_eq!(token.access_token.as_deref(), Some("abc"));

        let missing: InterTokenRaw =
            serde_json::from_value(json!({"error": "invalid_client"})).unwrap();
        assert!(missing.access_token.is_none());
    }
}
