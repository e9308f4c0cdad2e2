use serde::{Deserialize, Serialize};

/// Substitution data for one personalized render. Read-only to the engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    /// Stable identifier used to tag outcomes.
    pub id: String,
    /// Display name, substituted for `{{shopName}}`.
    pub name: String,
    /// Logo asset reference resolved through an [`AssetSource`](crate::AssetSource).
    #[serde(default, alias = "logoAssetRef")]
    pub logo: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
}

impl Recipient {
    /// Recipient with only an id and a name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style logo reference.
    pub fn with_logo(mut self, reference: impl Into<String>) -> Self {
        self.logo = Some(reference.into());
        self
    }

    /// Logo reference, treating an empty string as absent.
    pub fn logo_ref(&self) -> Option<&str> {
        self.logo.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Lifecycle state of a stored recipient.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientStatus {
    /// Eligible for generation.
    #[default]
    Active,
    /// Temporarily excluded.
    Suspended,
}

/// A recipient as kept by the persistence layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientRecord {
    /// Substitution data.
    #[serde(flatten)]
    pub recipient: Recipient,
    /// Lifecycle state.
    #[serde(default)]
    pub status: RecipientStatus,
}

impl From<RecipientRecord> for Recipient {
    fn from(record: RecipientRecord) -> Self {
        record.recipient
    }
}

/// Keep active records, in input order.
pub fn active_recipients(records: impl IntoIterator<Item = RecipientRecord>) -> Vec<Recipient> {
    records
        .into_iter()
        .filter(|r| r.status == RecipientStatus::Active)
        .map(Recipient::from)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/personalize/recipient.rs"]
mod tests;
