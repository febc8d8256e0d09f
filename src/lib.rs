//! Fetch Banco Inter statements, convert the transaction feed to OFX 1.02 and
//! deliver the PDF and OFX files.
//!
//! ```rust,ignore
//! use inter_statement_rs::{OfxBuilder, StatementRequest};
//!
//! let ofx_bytes = OfxBuilder::new()
//!     .raw_transactions(raw_records)
//!     .balance(raw_balance)
//!     .request(StatementRequest::new("2024-03-01", "2024-03-31"))
//!     .build();
//! ```

mod builder;
mod http;
mod types;

pub mod delivery;
pub mod errors;
pub mod inter;
pub mod ofx;
pub mod orchestrator;
pub mod traits;

pub use builder::{OfxBuilder, build_ofx};
pub use errors::{StatementError, StatementResult};
pub use orchestrator::{RunReport, StatementPipeline};
pub use types::{BalanceSnapshot, CREDIT_CODE, OperationType, StatementRequest, Transaction};
