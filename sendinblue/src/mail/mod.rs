//! Transactional email delivery through the Sendinblue HTTP API.
//!
//! # Quick Start
//!
//! ```ignore
//! // 1. Initialize mailer from environment
//! let mailer = SendinblueMailer::from_env()?;
//!
//! // 2. Compose
//! let email = Email::builder()
//!     .from(("My App", "noreply@example.com"))
//!     .to("user@example.com")
//!     .subject("Welcome!")
//!     .text("Thanks for signing up.")
//!     .tag("onboarding")
//!     .build()?;
//!
//! // 3. Send
//! let response = mailer.send(&email).await?;
//! ```
//!
//! # Environment Variables
//!
//! The [`SendinblueMailer::from_env`] method reads:
//!
//! | Variable | Required | Description |
//! |----------|----------|-------------|
//! | `SENDINBLUE_API_KEY` | Yes | API key, sent as the `api-key` header |
//! | `SENDINBLUE_BASE_URI` | No | Provider endpoint (default: `https://api.sendinblue.com`) |
//! | `SENDINBLUE_API_VERSION` | No | `v3` (default) or `v2` |

pub mod address;
pub mod attachment;
pub mod dispatch;
pub mod http;
mod mailer;
mod message;
pub mod metadata;
pub mod payload;

pub use address::Address;
pub use attachment::Attachment;
pub use dispatch::{deliver, DeliveryResponse};
pub use http::{HttpClient, HttpRequest, HttpResponse, ReqwestClient};
pub use mailer::{Mailer, MailerConfig, SendinblueMailer, DEFAULT_BASE_URI};
pub use message::{Email, EmailBuilder, Private};
pub use payload::{render_payload, ApiVersion, Dialect, V2, V3};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("missing required config: {0}")]
    MissingConfig(String),

    #[error("no API key set for the sendinblue mailer")]
    MissingApiKey,

    #[error("failed to read attachment {}: {source}", path.display())]
    AttachmentRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(
        "sendinblue API returned status {status}\n\nresponse:\n{response}\n\nrequest:\n{request}"
    )]
    Api {
        status: u16,
        response: String,
        /// Outgoing request with the API key filtered out.
        request: String,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("unsupported: {0}")]
    Unsupported(String),
}
