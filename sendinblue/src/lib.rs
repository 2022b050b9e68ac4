pub mod config;
pub mod mail;

pub use crate::config::EnvConfig;
pub use mail::{
    Address, ApiVersion, Attachment, DeliveryResponse, Email, EmailBuilder, MailError, Mailer,
    MailerConfig, SendinblueMailer,
};
