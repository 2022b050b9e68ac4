use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sendinblue::{Address, Attachment, Email};
use serde::Deserialize;
use serde_json::{Map, Value};

/// An email described as JSON on disk.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageFile {
    from: Address,
    #[serde(default)]
    to: Vec<Address>,
    #[serde(default)]
    cc: Vec<Address>,
    #[serde(default)]
    bcc: Vec<Address>,
    subject: Option<String>,
    html: Option<String>,
    text: Option<String>,
    #[serde(default)]
    headers: BTreeMap<String, String>,
    #[serde(default)]
    attachments: Vec<AttachmentEntry>,
    template_id: Option<Value>,
    params: Option<Map<String, Value>>,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AttachmentEntry {
    path: String,
    filename: Option<String>,
}

impl MessageFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading message file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing message file {}", path.display()))
    }

    /// Relative attachment paths resolve against `base`.
    pub fn into_email(self, base: &Path) -> Result<Email> {
        let mut builder = Email::builder().from(self.from).to_many(self.to);

        for address in self.cc {
            builder = builder.cc(address);
        }
        for address in self.bcc {
            builder = builder.bcc(address);
        }
        if let Some(subject) = self.subject {
            builder = builder.subject(subject);
        }
        if let Some(html) = self.html {
            builder = builder.html(html);
        }
        if let Some(text) = self.text {
            builder = builder.text(text);
        }
        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }
        for entry in self.attachments {
            let mut attachment = Attachment::from_path(relative_to(base, &entry.path));
            if let Some(filename) = entry.filename {
                attachment = attachment.with_filename(filename);
            }
            builder = builder.attachment(attachment);
        }
        if let Some(id) = self.template_id {
            builder = builder.template(id, self.params);
        }
        // The builder prepends, so feed the file's list back to front.
        for tag in self.tags.into_iter().rev() {
            builder = builder.tag(tag);
        }

        builder.build().context("building email")
    }
}

fn relative_to(base: &Path, path: &str) -> String {
    match Attachment::from_path(path) {
        Attachment::Local { path: local, .. } if local.is_relative() => {
            let joined: PathBuf = base.join(local);
            joined.to_string_lossy().into_owned()
        }
        _ => path.to_string(),
    }
}
