//! VoIP applications run once a call connects.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::gateway::required;
use crate::utils::FlexValue;
use crate::utils::timestamp::serde_datetime;
use crate::validation::{FieldError, ValidationErrors};

/// What the application does with an answered call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum VoipAppType {
    /// Bridge to another number.
    Dial = 1,
    #[default]
    PlayAudio = 2,
    Conference = 3,
    /// Text to speech.
    Speak = 4,
}

impl TryFrom<u8> for VoipAppType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Dial),
            2 => Ok(Self::PlayAudio),
            3 => Ok(Self::Conference),
            4 => Ok(Self::Speak),
            other => Err(format!("unknown application type {other}")),
        }
    }
}

impl From<VoipAppType> for u8 {
    fn from(kind: VoipAppType) -> Self {
        kind as Self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoipApp {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub app_type: VoipAppType,
    /// Type-specific payload: audio URL, conference room, dial string or text.
    pub data: String,
    #[serde(with = "serde_datetime")]
    pub created_date: NaiveDateTime,
    #[serde(with = "serde_datetime")]
    pub updated_date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVoipApp {
    pub name: String,
    pub description: String,
    pub app_type: VoipAppType,
    pub data: String,
}

impl NewVoipApp {
    pub fn new(name: impl Into<String>, app_type: VoipAppType, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            app_type,
            data: data.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoipAppInput {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "type")]
    pub app_type: Option<FlexValue>,
    pub data: Option<String>,
}

impl VoipAppInput {
    fn parse_type(&self, errors: &mut ValidationErrors) -> Option<VoipAppType> {
        let raw = self.app_type.as_ref()?;
        let parsed = raw
            .as_i64()
            .and_then(|v| u8::try_from(v).ok())
            .and_then(|v| VoipAppType::try_from(v).ok());
        if parsed.is_none() {
            errors.add(
                "app_type",
                FieldError::invalid(format!("'{raw}' is not a valid application type (1-4).")),
            );
        }
        parsed
    }

    pub fn normalize_new(&self) -> Result<NewVoipApp, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let app_type = self.parse_type(&mut errors);
        let name = required(self.name.as_deref(), "name", &mut errors);
        errors.into_result()?;

        let mut app = NewVoipApp::new(
            name,
            app_type.unwrap_or_default(),
            self.data.clone().unwrap_or_default(),
        );
        if let Some(description) = &self.description {
            app.description.clone_from(description);
        }
        Ok(app)
    }

    pub fn apply_to(
        &self,
        existing: &VoipApp,
        now: NaiveDateTime,
    ) -> Result<VoipApp, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let app_type = self.parse_type(&mut errors);
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            errors.add("name", FieldError::invalid("This field may not be blank."));
        }
        errors.into_result()?;

        let mut updated = existing.clone();
        if let Some(name) = &self.name {
            updated.name = name.trim().to_string();
        }
        if let Some(description) = &self.description {
            updated.description.clone_from(description);
        }
        if let Some(app_type) = app_type {
            updated.app_type = app_type;
        }
        if let Some(data) = &self.data {
            updated.data.clone_from(data);
        }
        updated.updated_date = now;
        Ok(updated)
    }
}
