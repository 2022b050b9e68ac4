//! Request bodies for the two generations of the transactional email API.
//!
//! Each generation is a [`Dialect`]: it knows its request path and how to
//! turn an [`Email`] into its own payload shape. The shared rules live in
//! [`address`](super::address), [`attachment`](super::attachment) and
//! [`metadata`](super::metadata); the dialects only decide the structure.

pub mod v2;
pub mod v3;

use serde::{Deserialize, Serialize};

use super::{Email, MailError};

pub use v2::V2;
pub use v3::V3;

/// One wire format of the provider API.
pub trait Dialect: Send + Sync + 'static {
    /// Path appended to the base URI.
    const PATH: &'static str;

    type Payload: Serialize + Send + Sync;

    /// Build a fresh request body for `email`. Local attachments are read here.
    fn build(email: &Email) -> Result<Self::Payload, MailError>;
}

/// Runtime choice of [`Dialect`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    V2,
    #[default]
    V3,
}

impl ApiVersion {
    pub fn path(self) -> &'static str {
        match self {
            ApiVersion::V2 => V2::PATH,
            ApiVersion::V3 => V3::PATH,
        }
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V2 => write!(f, "v2"),
            Self::V3 => write!(f, "v3"),
        }
    }
}

impl std::str::FromStr for ApiVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v2" | "2" => Ok(Self::V2),
            "v3" | "3" => Ok(Self::V3),
            other => Err(format!("unknown api version: {other}")),
        }
    }
}

/// Build the payload `version` would send, as plain JSON.
pub fn render_payload(email: &Email, version: ApiVersion) -> Result<serde_json::Value, MailError> {
    let value = match version {
        ApiVersion::V2 => serde_json::to_value(V2::build(email)?)?,
        ApiVersion::V3 => serde_json::to_value(V3::build(email)?)?,
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_versions() {
        assert_eq!("v2".parse::<ApiVersion>(), Ok(ApiVersion::V2));
        assert_eq!("V3".parse::<ApiVersion>(), Ok(ApiVersion::V3));
        assert!("v4".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn paths() {
        assert_eq!(ApiVersion::V2.path(), "/v2.0/email");
        assert_eq!(ApiVersion::V3.path(), "/v3/smtp/email");
    }

    #[test]
    fn render_switches_shape() {
        let email = Email::builder()
            .from(("From", "from@foo.com"))
            .to("to@bar.com")
            .build()
            .unwrap();

        let v2 = render_payload(&email, ApiVersion::V2).unwrap();
        let v3 = render_payload(&email, ApiVersion::V3).unwrap();

        assert!(v2.get("from").unwrap().is_array());
        assert!(v3.get("sender").unwrap().is_object());
    }
}
