use crate::{errors::StatementError, inter::prelude::*, ofx::prelude::*};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Provider code that marks an inflow. Every other code is a debit.
pub const CREDIT_CODE: &str = "C";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationType {
    Credit,
    Debit,
}

impl OperationType {
    pub fn from_code(code: Option<&str>) -> Self {
        if code == Some(CREDIT_CODE) {
            OperationType::Credit
        } else {
            OperationType::Debit
        }
    }

    /// `TRNTYPE` value. Debits are emitted as `PAYMENT`, which is what
    /// importers of Inter statements expect.
    pub fn ofx_type(&self) -> &'static str {
        match self {
            OperationType::Credit => "CREDIT",
            OperationType::Debit => "PAYMENT",
        }
    }

    /// `TRNAMT` value. The source amount is unsigned; debits get a leading `-`.
    pub fn signed_amount(&self, amount: &Decimal) -> String {
        match self {
            OperationType::Credit => amount.to_string(),
            OperationType::Debit => format!("-{amount}"),
        }
    }
}

/// One normalized statement line. There is no id field: `FITID` is a fresh
/// UUID synthesized each time the document is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub operation_type: OperationType,
    pub posted_date: OfxDate,
    pub amount: Decimal,
    pub memo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub available: Decimal,
}

/// Inclusive date window for one statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementRequest {
    pub start_date: OfxDate,
    pub end_date: OfxDate,
}

impl StatementRequest {
    pub fn new(start_date: impl Into<OfxDate>, end_date: impl Into<OfxDate>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }

    /// `{start}-{end}`, shared by the PDF and OFX artifact names.
    pub fn base_name(&self) -> String {
        format!("{}-{}", self.start_date, self.end_date)
    }

    /// Both dates must be real calendar dates with `start <= end`. The text is
    /// used verbatim downstream, so surrounding whitespace is rejected.
    pub fn validate(&self) -> Result<(NaiveDate, NaiveDate), StatementError> {
        let start: NaiveDate = (&self.start_date).try_into()?;
        let end: NaiveDate = (&self.end_date).try_into()?;

        if start > end {
            return Err(StatementError::InvalidDateRange {
                start: self.start_date.to_string(),
                end: self.end_date.to_string(),
            });
        }

        Ok((start, end))
    }
}

impl From<InterTransactionRaw> for Transaction {
    fn from(raw: InterTransactionRaw) -> Self {
        Transaction {
            operation_type: OperationType::from_code(raw.operation_code()),
            posted_date: raw.posted_date(),
            amount: raw.amount(),
            memo: raw.description(),
        }
    }
}

impl From<InterBalanceRaw> for BalanceSnapshot {
    fn from(raw: InterBalanceRaw) -> Self {
        BalanceSnapshot {
            available: raw.available(),
        }
    }
}
