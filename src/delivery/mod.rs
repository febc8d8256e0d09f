pub mod drive;
pub mod email;

pub mod prelude {
    pub use super::drive::{DriveCredentials, DriveUploader};
    pub use super::email::{DEFAULT_SENDER, SendGridMailer, parse_recipients};
}
