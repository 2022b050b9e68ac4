use std::collections::BTreeMap;

use base64::prelude::*;
use serde::Serialize;

use super::Dialect;
use crate::mail::address::{self, V2Recipients};
use crate::mail::attachment::Resolved;
use crate::mail::{metadata, Email, MailError};

/// `POST /v2.0/email`
pub struct V2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    pub from: (String, String),
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<V2Recipients>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replyto: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<V2Recipients>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<V2Recipients>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// filename -> base64 content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<BTreeMap<String, String>>,
}

impl Dialect for V2 {
    const PATH: &'static str = "/v2.0/email";

    type Payload = Payload;

    fn build(email: &Email) -> Result<Payload, MailError> {
        Ok(Payload {
            from: address::v2_sender(&email.from),
            to: address::v2_recipients(&email.to),
            replyto: metadata::v2_reply_to(email),
            cc: address::v2_recipients(&email.cc),
            bcc: address::v2_recipients(&email.bcc),
            subject: email.subject.clone(),
            html: email.html_body.clone(),
            text: email.text_body.clone(),
            attachment: attachments(email)?,
        })
    }
}

/// V2 only carries embedded content. A name used twice keeps the last file.
fn attachments(email: &Email) -> Result<Option<BTreeMap<String, String>>, MailError> {
    if email.attachments.is_empty() {
        return Ok(None);
    }

    let mut map = BTreeMap::new();
    for attachment in &email.attachments {
        match attachment.resolve()? {
            Resolved::Inline { name, data } => {
                map.insert(name, BASE64_STANDARD.encode(data));
            }
            Resolved::Link { url, .. } => {
                return Err(MailError::Unsupported(format!(
                    "the v2 API cannot attach remote files ({url})"
                )));
            }
        }
    }
    Ok(Some(map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::Attachment;
    use serde_json::json;

    fn build(email: &Email) -> serde_json::Value {
        serde_json::to_value(V2::build(email).unwrap()).unwrap()
    }

    #[test]
    fn full_message() {
        let email = Email::builder()
            .from(("From", "from@foo.com"))
            .to(("ToName", "to@bar.com"))
            .to("noname@bar.com")
            .cc(("CC", "cc@bar.com"))
            .bcc("bcc@bar.com")
            .subject("My Subject")
            .html("HTML BODY")
            .text("TEXT BODY")
            .header("reply-to", "reply@foo.com")
            .attachment(Attachment::inline("a.txt", b"hello".to_vec()))
            .build()
            .unwrap();

        assert_eq!(
            build(&email),
            json!({
                "from": ["from@foo.com", "From"],
                "to": { "to@bar.com": "ToName", "noname@bar.com": null },
                "replyto": "reply@foo.com",
                "cc": { "cc@bar.com": "CC" },
                "bcc": { "bcc@bar.com": null },
                "subject": "My Subject",
                "html": "HTML BODY",
                "text": "TEXT BODY",
                "attachment": { "a.txt": "aGVsbG8=" },
            })
        );
    }

    #[test]
    fn absent_fields_are_omitted() {
        let email = Email::builder()
            .from("from@foo.com")
            .to("to@bar.com")
            .build()
            .unwrap();

        assert_eq!(
            build(&email),
            json!({
                "from": ["from@foo.com", ""],
                "to": { "to@bar.com": null },
            })
        );
    }

    #[test]
    fn templates_and_tags_are_ignored() {
        let email = Email::builder()
            .from("from@foo.com")
            .to("to@bar.com")
            .template(1, None)
            .tag("welcome")
            .build()
            .unwrap();

        let value = build(&email);
        assert!(value.get("templateId").is_none());
        assert!(value.get("tags").is_none());
    }

    #[test]
    fn attachment_name_collision_keeps_last() {
        let email = Email::builder()
            .from("from@foo.com")
            .to("to@bar.com")
            .attachment(Attachment::inline("a.txt", b"one".to_vec()))
            .attachment(Attachment::inline("a.txt", b"two".to_vec()))
            .build()
            .unwrap();

        assert_eq!(build(&email)["attachment"], json!({ "a.txt": "dHdv" }));
    }

    #[test]
    fn remote_attachments_are_rejected() {
        let email = Email::builder()
            .from("from@foo.com")
            .to("to@bar.com")
            .attachment(Attachment::from_path("https://example.com/a.pdf"))
            .build()
            .unwrap();

        assert!(matches!(V2::build(&email), Err(MailError::Unsupported(_))));
    }
}
