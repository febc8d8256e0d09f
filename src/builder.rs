use chrono::{Local, NaiveDate};

use crate::{
    inter::prelude::*,
    ofx::prelude::*,
    types::{BalanceSnapshot, StatementRequest, Transaction},
};

/// Builds an OFX statement from normalized transactions.
///
/// Building never fails: missing pieces render as empty or zero fields.
#[derive(Debug, Clone, Default)]
pub struct OfxBuilder {
    transactions: Vec<Transaction>,
    balance: BalanceSnapshot,
    request: StatementRequest,
    generated_on: Option<NaiveDate>,
}

impl OfxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transactions(mut self, transactions: impl IntoIterator<Item = Transaction>) -> Self {
        self.transactions.extend(transactions);
        self
    }

    pub fn transaction(mut self, transaction: Transaction) -> Self {
        self.transactions.push(transaction);
        self
    }

    /// Normalizes raw Banco Inter records and appends them.
    pub fn raw_transactions(self, raw: impl IntoIterator<Item = InterTransactionRaw>) -> Self {
        self.transactions(raw.into_iter().map(Transaction::from))
    }

    pub fn balance(mut self, balance: impl Into<BalanceSnapshot>) -> Self {
        self.balance = balance.into();
        self
    }

    pub fn request(mut self, request: StatementRequest) -> Self {
        self.request = request;
        self
    }

    /// Date used for `DTSERVER` and `DTASOF`. Defaults to the local date at render time.
    pub fn generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = Some(date);
        self
    }

    pub fn render(&self) -> String {
        let today = self
            .generated_on
            .unwrap_or_else(|| Local::now().date_naive());

        render_document(&self.transactions, &self.balance, &self.request, today)
    }

    pub fn build(&self) -> Vec<u8> {
        encode_windows1252(&self.render())
    }
}

/// One-shot form of [`OfxBuilder`] with an explicit clock.
pub fn build_ofx(
    transactions: &[Transaction],
    balance: &BalanceSnapshot,
    request: &StatementRequest,
    today: NaiveDate,
) -> Vec<u8> {
    encode_windows1252(&render_document(transactions, balance, request, today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OperationType;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::str::FromStr;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
    }

    fn raw(value: serde_json::Value) -> InterTransactionRaw {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_builder_new() {
        let builder = OfxBuilder::new();
        assert!(builder.transactions.is_empty());
        assert_eq!(builder.balance, BalanceSnapshot::default());
        assert_eq!(builder.request, StatementRequest::default());
        assert!(builder.generated_on.is_none());
    }

    #[test]
    fn test_builder_chaining() {
        let builder = OfxBuilder::new()
            .raw_transactions(vec![raw(json!({"tipoOperacao": "C", "valor": 1.5}))])
            .transaction(Transaction {
                operation_type: OperationType::Debit,
                posted_date: "2024-03-02".into(),
                amount: Decimal::from_str("3").unwrap(),
                memo: String::new(),
            })
            .balance(BalanceSnapshot {
                available: Decimal::from_str("9.99").unwrap(),
            })
            .request(StatementRequest::new("2024-03-01", "2024-03-31"))
            .generated_on(today());

        assert_eq!(builder.transactions.len(), 2);
        assert_eq!(builder.transactions[0].operation_type, OperationType::Credit);
        assert_eq!(builder.balance.available.to_string(), "9.99");
        assert_eq!(builder.generated_on, Some(today()));
    }

    #[test]
    fn test_builder_accepts_raw_balance() {
        let balance: InterBalanceRaw =
            serde_json::from_value(json!({"disponivel": "1234.56"})).unwrap();
        let document = OfxBuilder::new().balance(balance).generated_on(today()).render();
        assert!(document.contains("<BALAMT>1234.56</BALAMT>"));
    }

    #[test]
    fn test_builder_without_input_still_renders() {
        let document = OfxBuilder::new().generated_on(today()).render();

        assert!(document.contains("<DTSTART></DTSTART>"));
        assert!(document.contains("<DTEND></DTEND>"));
        assert!(document.contains("<BALAMT>0</BALAMT>"));
        assert!(document.contains("<DTASOF>20240401</DTASOF>"));
        assert!(!document.contains("<STMTTRN>"));
    }

    #[test]
    fn test_builder_defaults_to_local_date() {
        let document = OfxBuilder::new().render();
        let expected = format!(
            "<DTSERVER>{}</DTSERVER>",
            format_ofx_date(Local::now().date_naive())
        );
        assert!(document.contains(&expected));
    }

    #[test]
    fn test_build_matches_build_ofx_shape() {
        let request = StatementRequest::new("2024-03-01", "2024-03-31");
        let from_builder = OfxBuilder::new()
            .request(request.clone())
            .generated_on(today())
            .build();
        let from_fn = build_ofx(&[], &BalanceSnapshot::default(), &request, today());

        // no transactions, so no FITIDs to differ
        assert_eq!(from_builder, from_fn);
    }

    #[test]
    fn test_build_encodes_windows1252() {
        let bytes = OfxBuilder::new()
            .raw_transactions(vec![raw(json!({"descricao": "Pix Joa\u{0303}o çé – €"}))])
            .generated_on(today())
            .build();

        assert!(bytes.windows(8).any(|w| w == b"\xe7\xe9 \x96 \x80</"));
        assert!(bytes.windows(5).any(|w| w == b"Joa?o"));
    }
}
