use std::fmt;

use crate::errors::StatementError;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const OFX_DATE_FORMAT: &str = "%Y%m%d";

/// A calendar date as the bank API delivers it (`YYYY-MM-DD`).
///
/// The raw text is kept instead of a parsed [`NaiveDate`] so that a malformed or
/// missing date degrades to a malformed OFX field rather than aborting the
/// document. Use `NaiveDate::try_from` where a real date is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OfxDate(String);

impl OfxDate {
    /// OFX rendering: the source text with every dash removed.
    pub fn to_ofx(&self) -> String {
        self.0.replace('-', "")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `YYYYMMDD`, as used for `DTSERVER` and `DTASOF`.
pub fn format_ofx_date(date: NaiveDate) -> String {
    date.format(OFX_DATE_FORMAT).to_string()
}

impl<'de> Deserialize<'de> for OfxDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(OfxDate)
    }
}

impl fmt::Display for OfxDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for OfxDate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for OfxDate {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<NaiveDate> for OfxDate {
    fn from(value: NaiveDate) -> Self {
        Self(value.format(ISO_DATE_FORMAT).to_string())
    }
}

impl TryFrom<&OfxDate> for NaiveDate {
    type Error = StatementError;

    fn try_from(date: &OfxDate) -> Result<Self, Self::Error> {
        NaiveDate::parse_from_str(&date.0, ISO_DATE_FORMAT)
            .map_err(|_| StatementError::InvalidDate(date.0.clone()))
    }
}

impl TryFrom<OfxDate> for NaiveDate {
    type Error = StatementError;

    fn try_from(date: OfxDate) -> Result<Self, Self::Error> {
        NaiveDate::try_from(&date)
    }
}
