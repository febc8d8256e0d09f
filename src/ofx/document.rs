//! OFX 1.02 (SGML) statement rendering.
//!
//! Every tag goes on its own line and leaf elements are written with explicit
//! end tags (`<CODE>0</CODE>`). Memo text is written verbatim: a `<` or `>` in a
//! memo breaks the document structure.

use chrono::NaiveDate;
use uuid::Uuid;

use super::types::format_ofx_date;
use crate::types::{BalanceSnapshot, StatementRequest, Transaction};

const HEADER: &[(&str, &str)] = &[
    ("OFXHEADER", "100"),
    ("DATA", "OFXSGML"),
    ("VERSION", "102"),
    ("SECURITY", "NONE"),
    ("ENCODING", "USASCII"),
    ("CHARSET", "1252"),
    ("COMPRESSION", "NONE"),
    ("OLDFILEUID", "NONE"),
    ("NEWFILEUID", "NONE"),
];

const STATUS_SUCCESS: &str = "0";
const SEVERITY_INFO: &str = "INFO";
const LANGUAGE: &str = "POR";
const CURRENCY: &str = "BRL";
const TRANSACTION_UID: &str = "1001";
const REFERENCE_NUMBER: &str = "0";

/// `<FI>` block of the signon response.
const INSTITUTION_ORG: &str = "Banco Intermedium S/A";
const INSTITUTION_FID: &str = "077";

/// `<BANKACCTFROM>` block. Static, not taken from the credentials' account.
const BANK_ID: &str = "077";
const BRANCH_ID: &str = "0001-9";
const ACCOUNT_ID: &str = "00000000-0";
const ACCOUNT_TYPE: &str = "CHECKING";

/// Line-oriented SGML writer that closes aggregates in reverse nesting order.
#[derive(Debug, Default)]
struct OfxWriter {
    lines: Vec<String>,
    open: Vec<&'static str>,
}

impl OfxWriter {
    fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn open(&mut self, tag: &'static str) {
        self.line(format!("<{tag}>"));
        self.open.push(tag);
    }

    fn close(&mut self) {
        if let Some(tag) = self.open.pop() {
            self.line(format!("</{tag}>"));
        }
    }

    fn element(&mut self, tag: &str, value: &str) {
        self.line(format!("<{tag}>{value}</{tag}>"));
    }

    fn status(&mut self) {
        self.open("STATUS");
        self.element("CODE", STATUS_SUCCESS);
        self.element("SEVERITY", SEVERITY_INFO);
        self.close();
    }

    fn finish(mut self) -> String {
        while !self.open.is_empty() {
            self.close();
        }
        self.lines.join("\n")
    }
}

/// Renders the complete OFX document as text.
///
/// `today` feeds `DTSERVER` and `DTASOF`. Each transaction gets a fresh v4 UUID
/// as `FITID`, so two renders of the same input differ only in those lines.
pub fn render_document(
    transactions: &[Transaction],
    balance: &BalanceSnapshot,
    request: &StatementRequest,
    today: NaiveDate,
) -> String {
    let today = format_ofx_date(today);
    let mut w = OfxWriter::default();

    for (name, value) in HEADER {
        w.line(format!("{name}:{value}"));
    }
    w.line("");

    w.open("OFX");

    w.open("SIGNONMSGSRSV1");
    w.open("SONRS");
    w.status();
    w.element("DTSERVER", &today);
    w.element("LANGUAGE", LANGUAGE);
    w.open("FI");
    w.element("ORG", INSTITUTION_ORG);
    w.element("FID", INSTITUTION_FID);
    w.close(); // FI
    w.close(); // SONRS
    w.close(); // SIGNONMSGSRSV1

    w.open("BANKMSGSRSV1");
    w.open("STMTTRNRS");
    w.element("TRNUID", TRANSACTION_UID);
    w.status();
    w.open("STMTRS");
    w.element("CURDEF", CURRENCY);

    w.open("BANKACCTFROM");
    w.element("BANKID", BANK_ID);
    w.element("BRANCHID", BRANCH_ID);
    w.element("ACCTID", ACCOUNT_ID);
    w.element("ACCTTYPE", ACCOUNT_TYPE);
    w.close();

    w.open("BANKTRANLIST");
    w.element("DTSTART", &request.start_date.to_ofx());
    w.element("DTEND", &request.end_date.to_ofx());
    for transaction in transactions {
        write_transaction(&mut w, transaction);
    }
    w.close();

    w.open("LEDGERBAL");
    w.element("BALAMT", &balance.available.to_string());
    w.element("DTASOF", &today);
    w.close();

    w.finish()
}

fn write_transaction(w: &mut OfxWriter, transaction: &Transaction) {
    let operation = transaction.operation_type;

    w.open("STMTTRN");
    w.element("TRNTYPE", operation.ofx_type());
    w.element("DTPOSTED", &transaction.posted_date.to_ofx());
    w.element("TRNAMT", &operation.signed_amount(&transaction.amount));
    w.element("FITID", &Uuid::new_v4().to_string());
    w.element("CHECKNUM", REFERENCE_NUMBER);
    w.element("REFNUM", REFERENCE_NUMBER);
    w.element("MEMO", &transaction.memo);
    w.close();
}

/// Code points that Windows-1252 places in `0x80..=0x9F`, where Latin-1 has
/// C1 controls.
const WINDOWS_1252_HIGH: [(char, u8); 27] = [
    ('\u{20AC}', 0x80),
    ('\u{201A}', 0x82),
    ('\u{0192}', 0x83),
    ('\u{201E}', 0x84),
    ('\u{2026}', 0x85),
    ('\u{2020}', 0x86),
    ('\u{2021}', 0x87),
    ('\u{02C6}', 0x88),
    ('\u{2030}', 0x89),
    ('\u{0160}', 0x8A),
    ('\u{2039}', 0x8B),
    ('\u{0152}', 0x8C),
    ('\u{017D}', 0x8E),
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201C}', 0x93),
    ('\u{201D}', 0x94),
    ('\u{2022}', 0x95),
    ('\u{2013}', 0x96),
    ('\u{2014}', 0x97),
    ('\u{02DC}', 0x98),
    ('\u{2122}', 0x99),
    ('\u{0161}', 0x9A),
    ('\u{203A}', 0x9B),
    ('\u{0153}', 0x9C),
    ('\u{017E}', 0x9E),
    ('\u{0178}', 0x9F),
];

/// Windows-1252 bytes, matching the `CHARSET:1252` header. Characters without a
/// cp1252 code point (C1 controls included) become `?` so encoding cannot fail.
pub fn encode_windows1252(document: &str) -> Vec<u8> {
    document.chars().map(windows1252_byte).collect()
}

fn windows1252_byte(c: char) -> u8 {
    match u32::from(c) {
        code @ (0x00..=0x7F | 0xA0..=0xFF) => code as u8,
        _ => WINDOWS_1252_HIGH
            .iter()
            .find(|(mapped, _)| *mapped == c)
            .map_or(b'?', |&(_, byte)| byte),
    }
}
