//! Phonebook domain types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{NameFilter, Scope};
use crate::utils::FlexValue;
use crate::utils::timestamp::serde_datetime;
use crate::validation::{FieldError, FieldErrorKind, ValidationErrors};

/// A named collection of destination numbers, optionally tied to a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phonebook {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub campaign_id: Option<i64>,
    pub user_id: i64,
    #[serde(with = "serde_datetime")]
    pub created_date: NaiveDateTime,
    #[serde(with = "serde_datetime")]
    pub updated_date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPhonebook {
    pub name: String,
    pub description: String,
    pub campaign_id: Option<i64>,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhonebookFilter {
    pub scope: Scope,
    pub name: Option<NameFilter>,
}

impl PhonebookFilter {
    pub const fn new(scope: Scope) -> Self {
        Self { scope, name: None }
    }
}

/// Phonebook fields as submitted by a client.
///
/// The campaign may be given as `campaign_id` or `campaign` (not both), as an
/// ID or a campaign URI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhonebookInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub campaign_id: Option<FlexValue>,
    pub campaign: Option<FlexValue>,
}

impl PhonebookInput {
    /// The referenced campaign ID, if one was supplied and is well formed.
    pub fn campaign_ref(&self) -> Result<Option<i64>, FieldError> {
        let raw = match (&self.campaign_id, &self.campaign) {
            (Some(_), Some(_)) => {
                return Err(FieldError::new(
                    FieldErrorKind::Invalid,
                    "Give the campaign as either 'campaign_id' or 'campaign', not both.",
                ));
            }
            (Some(raw), None) | (None, Some(raw)) => Some(raw),
            (None, None) => None,
        };
        raw.map(|raw| {
            raw.as_reference_id().ok_or_else(|| {
                FieldError::new(
                    FieldErrorKind::InvalidReference,
                    format!("'{raw}' is not a valid campaign reference."),
                )
            })
        })
        .transpose()
    }

    fn trimmed_name(&self) -> Option<String> {
        self.name.as_ref().map(|n| n.trim().to_string())
    }
}

pub fn normalize_new_phonebook(
    input: &PhonebookInput,
    user_id: i64,
) -> Result<NewPhonebook, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let campaign_id = input.campaign_ref().unwrap_or_else(|e| {
        errors.add("chk_campaign", e);
        None
    });
    let name = input.trimmed_name().filter(|n| !n.is_empty());
    if name.is_none() {
        errors.add("name", FieldError::missing());
    }
    errors.into_result()?;

    Ok(NewPhonebook {
        name: name.unwrap_or_default(),
        description: input.description.clone().unwrap_or_default(),
        campaign_id,
        user_id,
    })
}

pub fn apply_phonebook_update(
    existing: &Phonebook,
    input: &PhonebookInput,
    now: NaiveDateTime,
) -> Result<Phonebook, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let campaign_id = input.campaign_ref().unwrap_or_else(|e| {
        errors.add("chk_campaign", e);
        None
    });
    let name = input.trimmed_name();
    if name.as_deref() == Some("") {
        errors.add("name", FieldError::invalid("Name may not be blank."));
    }
    errors.into_result()?;

    let mut updated = existing.clone();
    if let Some(name) = name {
        updated.name = name;
    }
    if let Some(description) = &input.description {
        updated.description.clone_from(description);
    }
    if campaign_id.is_some() {
        updated.campaign_id = campaign_id;
    }
    updated.updated_date = now;
    Ok(updated)
}
