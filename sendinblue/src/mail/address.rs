//! Sender and recipient addresses, and their shape in each API dialect.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An email address with an optional display name.
///
/// `name: None` and `name: Some("")` are different things: the first has no
/// name at all, the second has an empty one. The payload builders keep them
/// apart.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "AddressRepr")]
pub struct Address {
    pub name: Option<String>,
    pub email: String,
}

impl Address {
    pub fn new(email: impl Into<String>) -> Self {
        Address {
            name: None,
            email: email.into(),
        }
    }

    pub fn with_name(name: impl Into<String>, email: impl Into<String>) -> Self {
        Address {
            name: Some(name.into()),
            email: email.into(),
        }
    }
}

impl From<&str> for Address {
    fn from(email: &str) -> Self {
        Address::new(email)
    }
}

impl From<String> for Address {
    fn from(email: String) -> Self {
        Address::new(email)
    }
}

/// `(name, email)`
impl<N: Into<String>, E: Into<String>> From<(N, E)> for Address {
    fn from((name, email): (N, E)) -> Self {
        Address::with_name(name, email)
    }
}

/// Either `"a@b.com"` or `{"email": "a@b.com", "name": "A"}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum AddressRepr {
    Bare(String),
    Full {
        email: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl From<AddressRepr> for Address {
    fn from(repr: AddressRepr) -> Self {
        match repr {
            AddressRepr::Bare(email) => Address::new(email),
            AddressRepr::Full { email, name } => Address { name, email },
        }
    }
}

// -------------------------------------------------------------------------
// V2
// -------------------------------------------------------------------------

/// V2 recipients are keyed by address, so a repeated address keeps the
/// last name given for it.
pub type V2Recipients = BTreeMap<String, Option<String>>;

/// V2 `from` is a `[email, name]` pair, the name defaulting to `""`.
pub fn v2_sender(address: &Address) -> (String, String) {
    (
        address.email.clone(),
        address.name.clone().unwrap_or_default(),
    )
}

/// Returns `None` for an empty list so the field is left out of the payload.
pub fn v2_recipients(addresses: &[Address]) -> Option<V2Recipients> {
    if addresses.is_empty() {
        return None;
    }

    let mut map = BTreeMap::new();
    for address in addresses {
        map.insert(address.email.clone(), address.name.clone());
    }
    Some(map)
}

// -------------------------------------------------------------------------
// V3
// -------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct V3Address {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<&Address> for V3Address {
    fn from(address: &Address) -> Self {
        V3Address {
            email: address.email.clone(),
            name: address.name.clone(),
        }
    }
}

/// Order is preserved and duplicates are kept.
pub fn v3_recipients(addresses: &[Address]) -> Option<Vec<V3Address>> {
    if addresses.is_empty() {
        return None;
    }
    Some(addresses.iter().map(V3Address::from).collect())
}
