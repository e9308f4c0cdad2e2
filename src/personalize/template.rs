use std::fmt;

use serde::{Deserialize, Serialize};

use crate::personalize::recipient::Recipient;

/// Placeholder tokens recognized in text elements and message templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// `{{shopName}}`
    ShopName,
    /// `{{address}}`
    Address,
    /// `{{phone}}`
    Phone,
    /// `{{email}}`
    Email,
}

impl Placeholder {
    /// Every recognized token, in substitution order.
    pub const ALL: [Self; 4] = [Self::ShopName, Self::Address, Self::Phone, Self::Email];

    /// Literal token text, braces included.
    pub fn token(self) -> &'static str {
        match self {
            Self::ShopName => "{{shopName}}",
            Self::Address => "{{address}}",
            Self::Phone => "{{phone}}",
            Self::Email => "{{email}}",
        }
    }

    /// Recipient field this token stands for.
    pub fn value_for(self, recipient: &Recipient) -> &str {
        match self {
            Self::ShopName => &recipient.name,
            Self::Address => &recipient.address,
            Self::Phone => &recipient.phone,
            Self::Email => &recipient.email,
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Replace every occurrence of every known token in `template`. Unknown `{{...}}` markers are
/// left untouched, and substituted values are never scanned again.
pub fn personalize(template: &str, recipient: &Recipient) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;
    'scan: while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        for p in Placeholder::ALL {
            if let Some(after) = tail.strip_prefix(p.token()) {
                out.push_str(p.value_for(recipient));
                rest = after;
                continue 'scan;
            }
        }
        out.push_str("{{");
        rest = &tail[2..];
    }
    out.push_str(rest);
    out
}

/// Subject/body pair for the message that accompanies each banner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTemplate {
    /// Subject line template.
    pub subject: String,
    /// Body template.
    pub body: String,
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            subject: "Your Personalized Banner is Here!".to_string(),
            body: "Hi {{shopName}},\n\nHere is your personalized banner, attached.".to_string(),
        }
    }
}

/// A [`MessageTemplate`] with one recipient's data substituted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PersonalizedMessage {
    /// Destination address.
    pub to: String,
    /// Final subject.
    pub subject: String,
    /// Final body.
    pub body: String,
}

impl MessageTemplate {
    /// Substitute `recipient` into subject and body.
    pub fn render_for(&self, recipient: &Recipient) -> PersonalizedMessage {
        PersonalizedMessage {
            to: recipient.email.clone(),
            subject: personalize(&self.subject, recipient),
            body: personalize(&self.body, recipient),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/personalize/template.rs"]
mod tests;
