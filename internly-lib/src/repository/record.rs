use agdb::{DbElement, DbKeyValue, DbValue};
use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// One intern's stored profile.
///
/// The collection schema was never enforced server-side, so every field is
/// validated and coerced once, when the raw document is read back
/// ([`InternRecord::from_element`]); nothing downstream re-checks types.
#[derive(Debug, Clone, PartialEq)]
pub struct InternRecord {
    /// Store key, derived from the username at creation. Never changes.
    pub id: String,
    pub name: String,
    /// Login identifier. Unique by convention only.
    pub username: String,
    /// Compared literally at login.
    pub password: String,
    pub referral_code: String,
    pub donations_raised: f64,
    pub joining_date: Option<JoinDate>,
}

/// A stored join date, keeping the store's timestamp-or-text duality.
///
/// Records created without an explicit date get a store-assigned timestamp;
/// admin-supplied dates are kept as the text that was typed in. Both sides
/// funnel through [`JoinDate::parsed`] so no caller has to care which one
/// it is holding.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinDate {
    /// Store-assigned, persisted as epoch milliseconds.
    Timestamp(DateTime<Utc>),
    /// Client-supplied date text, persisted verbatim.
    Text(String),
}

impl JoinDate {
    /// The join date as a point in time, when it can be read as one.
    pub fn parsed(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(timestamp) => Some(*timestamp),
            Self::Text(text) => parse_date_text(text),
        }
    }
}

impl InternRecord {
    pub fn parsed_join_date(&self) -> Option<DateTime<Utc>> {
        self.joining_date.as_ref().and_then(JoinDate::parsed)
    }

    /// The join date every ordering decision uses. Missing or unreadable
    /// dates collapse to the epoch.
    pub fn effective_join_date(&self) -> DateTime<Utc> {
        self.parsed_join_date().unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Build a record from a raw store element, coercing each field.
    pub(crate) fn from_element(element: &DbElement) -> Self {
        let mut record = Self {
            id: String::new(),
            name: String::new(),
            username: String::new(),
            password: String::new(),
            referral_code: String::new(),
            donations_raised: 0.0,
            joining_date: None,
        };
        let mut joined_at = None;
        let mut date_text = None;

        for entry in &element.values {
            let DbValue::String(key) = &entry.key else {
                continue;
            };
            match key.as_str() {
                "id" => record.id = string_value(&entry.value),
                "name" => record.name = string_value(&entry.value),
                "username" => record.username = string_value(&entry.value),
                "password" => record.password = string_value(&entry.value),
                "referral_code" => record.referral_code = string_value(&entry.value),
                "donations_raised" => record.donations_raised = numeric_value(&entry.value),
                "joined_at" => joined_at = integer_value(&entry.value),
                "joining_date" => date_text = Some(string_value(&entry.value)),
                _ => {}
            }
        }

        // A store-assigned timestamp wins over leftover date text.
        record.joining_date = match (joined_at, date_text) {
            (Some(millis), _) => Some(JoinDate::Timestamp(
                DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH),
            )),
            (None, Some(text)) => Some(JoinDate::Text(text)),
            (None, None) => None,
        };

        record
    }

    /// The record's full key-value form for insertion.
    pub(crate) fn db_values(&self) -> Vec<DbKeyValue> {
        let mut values: Vec<DbKeyValue> = vec![
            ("id", self.id.as_str()).into(),
            ("name", self.name.as_str()).into(),
            ("username", self.username.as_str()).into(),
            ("password", self.password.as_str()).into(),
            ("referral_code", self.referral_code.as_str()).into(),
            ("donations_raised", self.donations_raised).into(),
        ];

        match &self.joining_date {
            Some(JoinDate::Timestamp(timestamp)) => {
                values.push(("joined_at", timestamp.timestamp_millis()).into());
            }
            Some(JoinDate::Text(text)) => values.push(("joining_date", text.as_str()).into()),
            None => {}
        }

        values
    }
}

/// Input for [`Repository::add_intern`](crate::Repository::add_intern).
/// Blank optional fields get the portal's creation-time defaults.
#[derive(Debug, Clone, Default)]
pub struct NewIntern {
    pub name: String,
    pub username: String,
    pub password: String,
    /// Auto-generated from the name when empty.
    pub referral_code: Option<String>,
    pub donations_raised: f64,
    /// Free date text; the current timestamp is assigned when empty.
    pub joining_date: Option<String>,
}

impl NewIntern {
    /// Resolve creation-time defaults into a full record.
    pub(crate) fn into_record(self, now: DateTime<Utc>) -> InternRecord {
        let id = intern_id(&self.username);
        let referral_code = match self.referral_code {
            Some(code) if !code.is_empty() => code,
            _ => default_referral_code(&self.name, now),
        };
        let joining_date = Some(match self.joining_date {
            Some(text) if !text.is_empty() => JoinDate::Text(text),
            _ => JoinDate::Timestamp(now),
        });

        InternRecord {
            id,
            name: self.name,
            username: self.username,
            password: self.password,
            referral_code,
            donations_raised: self.donations_raised,
            joining_date,
        }
    }
}

/// Field-level update for
/// [`Repository::update_intern`](crate::Repository::update_intern). Only
/// populated fields are written; `id` and the join date never change after
/// creation.
#[derive(Debug, Clone, Default)]
pub struct InternPatch {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub referral_code: Option<String>,
    pub donations_raised: Option<f64>,
}

impl InternPatch {
    pub(crate) fn db_values(&self) -> Vec<DbKeyValue> {
        let mut values: Vec<DbKeyValue> = Vec::new();

        if let Some(name) = &self.name {
            values.push(("name", name.as_str()).into());
        }
        if let Some(username) = &self.username {
            values.push(("username", username.as_str()).into());
        }
        if let Some(password) = &self.password {
            values.push(("password", password.as_str()).into());
        }
        if let Some(referral_code) = &self.referral_code {
            values.push(("referral_code", referral_code.as_str()).into());
        }
        if let Some(donations_raised) = self.donations_raised {
            values.push(("donations_raised", donations_raised).into());
        }

        values
    }
}

/// Record ids are derived from the login name: lowercased, with each
/// whitespace run replaced by a `-`. Stable for the record's lifetime.
pub fn intern_id(username: &str) -> String {
    let mut id = String::with_capacity(username.len());
    let mut in_gap = false;

    for ch in username.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_gap {
                id.push('-');
            }
            in_gap = true;
        } else {
            id.push(ch);
            in_gap = false;
        }
    }

    id
}

/// Auto-generated referral code: lowercased name with whitespace removed,
/// plus the current year.
fn default_referral_code(name: &str, now: DateTime<Utc>) -> String {
    let compact: String = name
        .to_lowercase()
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect();

    format!("{compact}{}", now.year())
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

fn string_value(value: &DbValue) -> String {
    match value {
        DbValue::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// `donations_raised` is written as a float, but the collection holds
/// whatever older writers put there. Anything unreadable counts as zero.
fn numeric_value(value: &DbValue) -> f64 {
    match value {
        DbValue::F64(float) => float.to_f64(),
        DbValue::I64(int) => *int as f64,
        DbValue::U64(int) => *int as f64,
        DbValue::String(text) => text.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn integer_value(value: &DbValue) -> Option<i64> {
    match value {
        DbValue::I64(int) => Some(*int),
        DbValue::U64(int) => i64::try_from(*int).ok(),
        _ => None,
    }
}
