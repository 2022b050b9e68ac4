//! Reply-to, template and tag fields taken from headers and the private
//! store of an [`Email`].

use serde::Serialize;
use serde_json::{Map, Value};

use super::Email;

/// V2 reads the combined reply-to value from this header.
pub const REPLY_TO: &str = "reply-to";
/// V3 reads the reply-to address from this header.
pub const REPLY_TO_EMAIL: &str = "reply-to-email";
/// V3 reads the reply-to display name from this header.
pub const REPLY_TO_NAME: &str = "reply-to-name";

pub fn v2_reply_to(email: &Email) -> Option<String> {
    email.headers.get(REPLY_TO).cloned()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct V3ReplyTo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Each key is set independently; a name header holding `""` still counts.
pub fn v3_reply_to(email: &Email) -> Option<V3ReplyTo> {
    let reply_to = V3ReplyTo {
        email: email.headers.get(REPLY_TO_EMAIL).cloned(),
        name: email.headers.get(REPLY_TO_NAME).cloned(),
    };

    if reply_to.email.is_none() && reply_to.name.is_none() {
        None
    } else {
        Some(reply_to)
    }
}

/// `(templateId, params)`, with params defaulting to `{}` once a template id
/// is present. Params without an id are ignored.
pub fn v3_template(email: &Email) -> Option<(Value, Map<String, Value>)> {
    let id = email.private.template_id.clone()?;
    let params = email.private.template_params.clone().unwrap_or_default();
    Some((id, params))
}

/// Tags are already stored in payload order.
pub fn v3_tags(email: &Email) -> Option<Vec<String>> {
    if email.private.tags.is_empty() {
        None
    } else {
        Some(email.private.tags.clone())
    }
}
