pub mod client;
pub mod credentials;
pub mod dto;
pub mod types;

pub mod prelude {
    pub use super::client::InterClient;
    pub use super::credentials::BankCredentials;
    pub use super::dto::{InterBalanceRaw, InterTransactionRaw};
}
