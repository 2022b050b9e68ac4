use base64::prelude::*;
use serde::Serialize;
use serde_json::{Map, Value};

use super::Dialect;
use crate::mail::address::{self, V3Address};
use crate::mail::attachment::Resolved;
use crate::mail::metadata::{self, V3ReplyTo};
use crate::mail::{Email, MailError};

/// `POST /v3/smtp/email`
pub struct V3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub sender: V3Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Vec<V3Address>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<V3ReplyTo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<Vec<V3Address>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<Vec<V3Address>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Vec<V3Attachment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum V3Attachment {
    /// base64 content embedded in the request
    Content { content: String, name: String },
    /// fetched by the provider
    Url { url: String, name: String },
}

impl From<Resolved> for V3Attachment {
    fn from(resolved: Resolved) -> Self {
        match resolved {
            Resolved::Inline { name, data } => V3Attachment::Content {
                content: BASE64_STANDARD.encode(data),
                name,
            },
            Resolved::Link { name, url } => V3Attachment::Url { url, name },
        }
    }
}

impl Dialect for V3 {
    const PATH: &'static str = "/v3/smtp/email";

    type Payload = Payload;

    fn build(email: &Email) -> Result<Payload, MailError> {
        let (template_id, params) = match metadata::v3_template(email) {
            Some((id, params)) => (Some(id), Some(params)),
            None => (None, None),
        };

        Ok(Payload {
            sender: V3Address::from(&email.from),
            to: address::v3_recipients(&email.to),
            reply_to: metadata::v3_reply_to(email),
            cc: address::v3_recipients(&email.cc),
            bcc: address::v3_recipients(&email.bcc),
            subject: email.subject.clone(),
            html_content: email.html_body.clone(),
            text_content: email.text_body.clone(),
            attachment: attachments(email)?,
            template_id,
            params,
            tags: metadata::v3_tags(email),
        })
    }
}

fn attachments(email: &Email) -> Result<Option<Vec<V3Attachment>>, MailError> {
    if email.attachments.is_empty() {
        return Ok(None);
    }

    let attachments = email
        .attachments
        .iter()
        .map(|attachment| attachment.resolve().map(V3Attachment::from))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(attachments))
}
