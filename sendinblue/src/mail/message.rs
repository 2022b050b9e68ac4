//! Email message types and builder.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::{Address, Attachment, MailError};

/// Provider-specific data carried alongside a message.
///
/// Filled through [`EmailBuilder::template`] and [`EmailBuilder::tag`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Private {
    /// Provider template to render instead of the message bodies.
    pub template_id: Option<Value>,
    /// Variables made available to the template.
    pub template_params: Option<Map<String, Value>>,
    /// Most recent tag first.
    pub tags: Vec<String>,
}

/// A complete email message ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct Email {
    /// Sender address.
    pub from: Address,
    /// Primary recipients.
    pub to: Vec<Address>,
    /// Carbon copy recipients.
    pub cc: Vec<Address>,
    /// Blind carbon copy recipients.
    pub bcc: Vec<Address>,
    /// Email subject line.
    pub subject: Option<String>,
    pub html_body: Option<String>,
    pub text_body: Option<String>,
    /// Extra headers, keyed exactly as supplied. Reply-to information lives here.
    pub headers: BTreeMap<String, String>,
    pub attachments: Vec<Attachment>,
    pub private: Private,
}

impl Email {
    /// Create a new email builder.
    pub fn builder() -> EmailBuilder {
        EmailBuilder::default()
    }
}

/// Builder for constructing [`Email`] instances.
#[derive(Debug, Default)]
pub struct EmailBuilder {
    from: Option<Address>,
    to: Vec<Address>,
    cc: Vec<Address>,
    bcc: Vec<Address>,
    subject: Option<String>,
    text: Option<String>,
    html: Option<String>,
    headers: BTreeMap<String, String>,
    attachments: Vec<Attachment>,
    private: Private,
}

impl EmailBuilder {
    /// Set the sender (required). Accepts `"a@b.com"` or `("Name", "a@b.com")`.
    pub fn from(mut self, address: impl Into<Address>) -> Self {
        self.from = Some(address.into());
        self
    }

    /// Add a primary recipient.
    pub fn to(mut self, address: impl Into<Address>) -> Self {
        self.to.push(address.into());
        self
    }

    /// Add multiple primary recipients.
    pub fn to_many(mut self, addresses: impl IntoIterator<Item = impl Into<Address>>) -> Self {
        self.to.extend(addresses.into_iter().map(Into::into));
        self
    }

    /// Add a CC recipient.
    pub fn cc(mut self, address: impl Into<Address>) -> Self {
        self.cc.push(address.into());
        self
    }

    /// Add a BCC recipient.
    pub fn bcc(mut self, address: impl Into<Address>) -> Self {
        self.bcc.push(address.into());
        self
    }

    /// Set the subject line.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set plain text body content.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set HTML body content.
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Set a header, replacing any previous value under the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Render a provider template. Replaces any template set earlier.
    pub fn template(mut self, id: impl Into<Value>, params: Option<Map<String, Value>>) -> Self {
        self.private.template_id = Some(id.into());
        self.private.template_params = params;
        self
    }

    /// Tag the message. The newest tag goes first, so `tag("a").tag("b")`
    /// yields `["b", "a"]`.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.private.tags.insert(0, tag.into());
        self
    }

    /// Build the email, validating required fields.
    pub fn build(self) -> Result<Email, MailError> {
        let from = self
            .from
            .ok_or_else(|| MailError::Build("from address required".into()))?;

        if self.to.is_empty() {
            return Err(MailError::Build("at least one recipient required".into()));
        }

        Ok(Email {
            from,
            to: self.to,
            cc: self.cc,
            bcc: self.bcc,
            subject: self.subject,
            html_body: self.html,
            text_body: self.text,
            headers: self.headers,
            attachments: self.attachments,
            private: self.private,
        })
    }
}
