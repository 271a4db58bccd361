//! Campaign domain types and input normalization.
//!
//! A campaign arrives as a loosely-typed [`CampaignInput`]. Parsing turns it
//! into [`ParsedCampaign`] (typed, still partial) and records shape errors.
//! The validator runs lookups against the parsed values; normalization then
//! produces either a [`NewCampaign`] (create) or an updated [`Campaign`].

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DialerLimit, Scope};
use crate::utils::FlexValue;
use crate::utils::timestamp::{self, DEFAULT_CAMPAIGN_WINDOW_SECS, serde_datetime};
use crate::validation::{FieldError, FieldErrorKind, ValidationErrors};

/// Length of a generated campaign code.
pub const CAMPAIGN_CODE_LEN: usize = 5;

/// Lifecycle state of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum CampaignStatus {
    #[default]
    Start = 1,
    Pause = 2,
    Abort = 3,
    End = 4,
}

impl CampaignStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Pause => "pause",
            Self::Abort => "abort",
            Self::End => "end",
        }
    }
}

impl TryFrom<u8> for CampaignStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Start),
            2 => Ok(Self::Pause),
            3 => Ok(Self::Abort),
            4 => Ok(Self::End),
            other => Err(format!("unknown campaign status {other}")),
        }
    }
}

impl From<CampaignStatus> for u8 {
    fn from(status: CampaignStatus) -> Self {
        status as Self
    }
}

/// Days of the week a campaign may dial on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
}

impl WeeklySchedule {
    pub const DAYS: [&'static str; 7] = [
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
        "sunday",
    ];

    fn slot(&mut self, day: usize) -> Option<&mut bool> {
        match day {
            0 => Some(&mut self.monday),
            1 => Some(&mut self.tuesday),
            2 => Some(&mut self.wednesday),
            3 => Some(&mut self.thursday),
            4 => Some(&mut self.friday),
            5 => Some(&mut self.saturday),
            6 => Some(&mut self.sunday),
            _ => None,
        }
    }

    /// Overwrite the days for which `flags` holds a value.
    pub fn apply(&mut self, flags: &[Option<bool>; 7]) {
        for (day, flag) in flags.iter().enumerate() {
            if let (Some(value), Some(slot)) = (flag, self.slot(day)) {
                *slot = *value;
            }
        }
    }
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self {
            monday: true,
            tuesday: true,
            wednesday: true,
            thursday: true,
            friday: true,
            saturday: true,
            sunday: true,
        }
    }
}

/// Call pacing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pacing {
    /// Calls per minute.
    pub frequency: u32,
    /// Maximum call duration in seconds.
    pub callmaxduration: u32,
    pub maxretry: u32,
    /// Seconds between retries.
    pub intervalretry: u32,
    /// Seconds to wait for an answer.
    pub calltimeout: u32,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            frequency: 10,
            callmaxduration: 1800,
            maxretry: 0,
            intervalretry: 300,
            calltimeout: 45,
        }
    }
}

/// One pacing parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacingField {
    Frequency,
    CallMaxDuration,
    MaxRetry,
    IntervalRetry,
    CallTimeout,
}

impl PacingField {
    pub const ALL: [Self; 5] = [
        Self::Frequency,
        Self::CallMaxDuration,
        Self::MaxRetry,
        Self::IntervalRetry,
        Self::CallTimeout,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Frequency => "frequency",
            Self::CallMaxDuration => "callmaxduration",
            Self::MaxRetry => "maxretry",
            Self::IntervalRetry => "intervalretry",
            Self::CallTimeout => "calltimeout",
        }
    }

    /// The dialer limit bounding this field, if any.
    pub const fn limit(self) -> Option<DialerLimit> {
        match self {
            Self::Frequency => Some(DialerLimit::Frequency),
            Self::CallMaxDuration => Some(DialerLimit::Duration),
            Self::MaxRetry => Some(DialerLimit::Retry),
            Self::CallTimeout => Some(DialerLimit::Timeout),
            Self::IntervalRetry => None,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl Pacing {
    pub const fn get(&self, field: PacingField) -> u32 {
        match field {
            PacingField::Frequency => self.frequency,
            PacingField::CallMaxDuration => self.callmaxduration,
            PacingField::MaxRetry => self.maxretry,
            PacingField::IntervalRetry => self.intervalretry,
            PacingField::CallTimeout => self.calltimeout,
        }
    }

    pub const fn set(&mut self, field: PacingField, value: u32) {
        match field {
            PacingField::Frequency => self.frequency = value,
            PacingField::CallMaxDuration => self.callmaxduration = value,
            PacingField::MaxRetry => self.maxretry = value,
            PacingField::IntervalRetry => self.intervalretry = value,
            PacingField::CallTimeout => self.calltimeout = value,
        }
    }
}

/// A persisted campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    pub campaign_code: String,
    pub name: String,
    pub description: String,
    pub callerid: String,
    pub status: CampaignStatus,
    #[serde(with = "serde_datetime")]
    pub startingdate: NaiveDateTime,
    #[serde(with = "serde_datetime")]
    pub expirationdate: NaiveDateTime,
    pub daily_start_time: NaiveTime,
    pub daily_stop_time: NaiveTime,
    #[serde(flatten)]
    pub schedule: WeeklySchedule,
    #[serde(flatten)]
    pub pacing: Pacing,
    pub aleg_gateway_id: Option<i64>,
    pub voipapp_id: Option<i64>,
    pub extra_data: String,
    pub user_id: i64,
    #[serde(with = "serde_datetime")]
    pub created_date: NaiveDateTime,
    #[serde(with = "serde_datetime")]
    pub updated_date: NaiveDateTime,
}

/// A campaign ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCampaign {
    pub campaign_code: String,
    pub name: String,
    pub description: String,
    pub callerid: String,
    pub status: CampaignStatus,
    pub startingdate: NaiveDateTime,
    pub expirationdate: NaiveDateTime,
    pub daily_start_time: NaiveTime,
    pub daily_stop_time: NaiveTime,
    pub schedule: WeeklySchedule,
    pub pacing: Pacing,
    pub aleg_gateway_id: Option<i64>,
    pub voipapp_id: Option<i64>,
    pub extra_data: String,
    pub user_id: i64,
}

/// Name matching for campaign and phonebook lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameFilter {
    Exact(String),
    Contains(String),
}

/// List filters for campaigns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignFilter {
    pub scope: Scope,
    pub name: Option<NameFilter>,
    pub status: Option<CampaignStatus>,
}

impl CampaignFilter {
    pub const fn new(scope: Scope) -> Self {
        Self {
            scope,
            name: None,
            status: None,
        }
    }
}

/// Generate a random campaign code of upper-case ASCII letters.
pub fn generate_campaign_code() -> String {
    Uuid::new_v4()
        .as_bytes()
        .iter()
        .take(CAMPAIGN_CODE_LEN)
        .map(|b| char::from(b'A' + b % 26))
        .collect()
}

/// Default daily window start.
pub fn default_daily_start() -> NaiveTime {
    NaiveTime::default()
}

/// Default daily window end (`23:59:59`).
pub fn default_daily_stop() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or_default()
}

/// Campaign fields as submitted by a client.
///
/// Every field is optional; numeric, boolean and reference fields accept
/// either JSON scalars or strings. An owner (`user`) supplied by the client
/// is ignored since the owner is always the authenticated caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub callerid: Option<String>,
    pub status: Option<FlexValue>,
    pub startingdate: Option<FlexValue>,
    pub expirationdate: Option<FlexValue>,
    pub daily_start_time: Option<String>,
    pub daily_stop_time: Option<String>,
    pub monday: Option<FlexValue>,
    pub tuesday: Option<FlexValue>,
    pub wednesday: Option<FlexValue>,
    pub thursday: Option<FlexValue>,
    pub friday: Option<FlexValue>,
    pub saturday: Option<FlexValue>,
    pub sunday: Option<FlexValue>,
    pub frequency: Option<FlexValue>,
    pub callmaxduration: Option<FlexValue>,
    pub maxretry: Option<FlexValue>,
    pub intervalretry: Option<FlexValue>,
    pub calltimeout: Option<FlexValue>,
    pub aleg_gateway: Option<FlexValue>,
    pub voipapp: Option<FlexValue>,
    pub extra_data: Option<String>,
}

/// Typed view of a [`CampaignInput`]. `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCampaign {
    pub name: Option<String>,
    pub description: Option<String>,
    pub callerid: Option<String>,
    pub status: Option<CampaignStatus>,
    pub startingdate: Option<NaiveDateTime>,
    pub expirationdate: Option<NaiveDateTime>,
    pub daily_start_time: Option<NaiveTime>,
    pub daily_stop_time: Option<NaiveTime>,
    pub weekdays: [Option<bool>; 7],
    pub pacing: [Option<u32>; 5],
    pub aleg_gateway: Option<i64>,
    pub voipapp: Option<i64>,
    pub extra_data: Option<String>,
}

impl ParsedCampaign {
    pub const fn pacing_value(&self, field: PacingField) -> Option<u32> {
        self.pacing[field.index()]
    }
}

fn parse_epoch(
    value: Option<&FlexValue>,
    key: &str,
    errors: &mut ValidationErrors,
) -> Option<NaiveDateTime> {
    let value = value?;
    let parsed = value.as_f64().and_then(timestamp::from_epoch_seconds);
    if parsed.is_none() {
        errors.add(
            key,
            FieldError::invalid(format!("'{value}' is not a valid epoch timestamp.")),
        );
    }
    parsed
}

fn parse_daily_time(
    value: Option<&String>,
    key: &str,
    errors: &mut ValidationErrors,
) -> Option<NaiveTime> {
    let value = value?.trim();
    let parsed = NaiveTime::parse_from_str(value, timestamp::TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok();
    if parsed.is_none() {
        errors.add(
            key,
            FieldError::invalid(format!("'{value}' is not a valid time (HH:MM:SS).")),
        );
    }
    parsed
}

fn parse_reference(
    value: Option<&FlexValue>,
    key: &str,
    errors: &mut ValidationErrors,
) -> Option<i64> {
    let value = value?;
    let parsed = value.as_reference_id();
    if parsed.is_none() {
        errors.add(
            key,
            FieldError::new(
                FieldErrorKind::InvalidReference,
                format!("'{value}' is not a valid reference."),
            ),
        );
    }
    parsed
}

impl CampaignInput {
    fn weekday_values(&self) -> [Option<&FlexValue>; 7] {
        [
            self.monday.as_ref(),
            self.tuesday.as_ref(),
            self.wednesday.as_ref(),
            self.thursday.as_ref(),
            self.friday.as_ref(),
            self.saturday.as_ref(),
            self.sunday.as_ref(),
        ]
    }

    pub const fn pacing_input(&self, field: PacingField) -> Option<&FlexValue> {
        match field {
            PacingField::Frequency => self.frequency.as_ref(),
            PacingField::CallMaxDuration => self.callmaxduration.as_ref(),
            PacingField::MaxRetry => self.maxretry.as_ref(),
            PacingField::IntervalRetry => self.intervalretry.as_ref(),
            PacingField::CallTimeout => self.calltimeout.as_ref(),
        }
    }

    /// Convert every supplied field, collecting shape errors.
    pub fn parse(&self) -> (ParsedCampaign, ValidationErrors) {
        let mut errors = ValidationErrors::new();
        let mut parsed = ParsedCampaign {
            name: self.name.as_ref().map(|n| n.trim().to_string()),
            description: self.description.clone(),
            callerid: self.callerid.clone(),
            extra_data: self.extra_data.clone(),
            ..ParsedCampaign::default()
        };

        if let Some(raw) = &self.status {
            parsed.status = raw
                .as_i64()
                .and_then(|v| u8::try_from(v).ok())
                .and_then(|v| CampaignStatus::try_from(v).ok());
            if parsed.status.is_none() {
                errors.add(
                    "status",
                    FieldError::invalid(format!("'{raw}' is not a valid status (1-4).")),
                );
            }
        }

        parsed.startingdate =
            parse_epoch(self.startingdate.as_ref(), "chk_startingdate", &mut errors);
        parsed.expirationdate =
            parse_epoch(self.expirationdate.as_ref(), "chk_expirationdate", &mut errors);
        parsed.daily_start_time =
            parse_daily_time(self.daily_start_time.as_ref(), "daily_start_time", &mut errors);
        parsed.daily_stop_time =
            parse_daily_time(self.daily_stop_time.as_ref(), "daily_stop_time", &mut errors);

        for (day, raw) in self.weekday_values().into_iter().enumerate() {
            let Some(raw) = raw else { continue };
            parsed.weekdays[day] = raw.as_bool();
            if parsed.weekdays[day].is_none() {
                errors.add(
                    WeeklySchedule::DAYS[day],
                    FieldError::invalid(format!("'{raw}' is not a valid flag.")),
                );
            }
        }

        for field in PacingField::ALL {
            let Some(raw) = self.pacing_input(field) else { continue };
            parsed.pacing[field.index()] = raw.as_u32();
            if parsed.pacing[field.index()].is_none() {
                errors.add(
                    field.name(),
                    FieldError::invalid(format!("'{raw}' is not a non-negative integer.")),
                );
            }
        }

        parsed.aleg_gateway =
            parse_reference(self.aleg_gateway.as_ref(), "chk_gateway", &mut errors);
        parsed.voipapp = parse_reference(self.voipapp.as_ref(), "chk_voipapp", &mut errors);

        (parsed, errors)
    }
}

/// Build the record to insert for a create request.
///
/// Absent dates default to `now` and `now + 7 days`; every other absent
/// field takes its documented default.
pub fn normalize_new_campaign(
    input: &CampaignInput,
    user_id: i64,
    now: NaiveDateTime,
    campaign_code: String,
) -> Result<NewCampaign, ValidationErrors> {
    let (parsed, mut errors) = input.parse();
    let name = match parsed.name.filter(|n| !n.is_empty()) {
        Some(name) => name,
        None => {
            errors.add("name", FieldError::missing());
            String::new()
        }
    };
    errors.into_result()?;

    let mut schedule = WeeklySchedule::default();
    schedule.apply(&parsed.weekdays);

    let mut pacing = Pacing::default();
    for field in PacingField::ALL {
        if let Some(value) = parsed.pacing[field.index()] {
            pacing.set(field, value);
        }
    }

    Ok(NewCampaign {
        campaign_code,
        name,
        description: parsed.description.unwrap_or_default(),
        callerid: parsed.callerid.unwrap_or_default(),
        status: parsed.status.unwrap_or_default(),
        startingdate: parsed.startingdate.unwrap_or(now),
        expirationdate: parsed
            .expirationdate
            .unwrap_or_else(|| now + Duration::seconds(DEFAULT_CAMPAIGN_WINDOW_SECS)),
        daily_start_time: parsed.daily_start_time.unwrap_or_else(default_daily_start),
        daily_stop_time: parsed.daily_stop_time.unwrap_or_else(default_daily_stop),
        schedule,
        pacing,
        aleg_gateway_id: parsed.aleg_gateway,
        voipapp_id: parsed.voipapp,
        extra_data: parsed.extra_data.unwrap_or_default(),
        user_id,
    })
}

/// Merge an update request into an existing campaign.
///
/// Only supplied fields change; dates in particular are rewritten only when
/// the request carries them. Owner and code never change.
pub fn apply_campaign_update(
    existing: &Campaign,
    input: &CampaignInput,
    now: NaiveDateTime,
) -> Result<Campaign, ValidationErrors> {
    let (parsed, mut errors) = input.parse();
    if parsed.name.as_deref() == Some("") {
        errors.add("name", FieldError::invalid("Name may not be blank."));
    }
    errors.into_result()?;

    let mut updated = existing.clone();
    if let Some(name) = parsed.name {
        updated.name = name;
    }
    if let Some(description) = parsed.description {
        updated.description = description;
    }
    if let Some(callerid) = parsed.callerid {
        updated.callerid = callerid;
    }
    if let Some(status) = parsed.status {
        updated.status = status;
    }
    if let Some(start) = parsed.startingdate {
        updated.startingdate = start;
    }
    if let Some(expiration) = parsed.expirationdate {
        updated.expirationdate = expiration;
    }
    if let Some(start) = parsed.daily_start_time {
        updated.daily_start_time = start;
    }
    if let Some(stop) = parsed.daily_stop_time {
        updated.daily_stop_time = stop;
    }
    updated.schedule.apply(&parsed.weekdays);
    for field in PacingField::ALL {
        if let Some(value) = parsed.pacing[field.index()] {
            updated.pacing.set(field, value);
        }
    }
    if parsed.aleg_gateway.is_some() {
        updated.aleg_gateway_id = parsed.aleg_gateway;
    }
    if parsed.voipapp.is_some() {
        updated.voipapp_id = parsed.voipapp;
    }
    if let Some(extra) = parsed.extra_data {
        updated.extra_data = extra;
    }
    updated.updated_date = now;
    Ok(updated)
}
