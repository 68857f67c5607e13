// src/response.rs

use anyhow::{anyhow, Result};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::parse::{ParsedResponse, TABLE_KEY};

/// A parsed e-Stat response: metadata tags plus the raw table section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatsResponse {
    fields: ParsedResponse,
}

impl StatsResponse {
    pub fn new(fields: ParsedResponse) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn status(&self) -> Option<&str> {
        self.get("STATUS")
    }

    pub fn error_msg(&self) -> Option<&str> {
        self.get("ERROR_MSG")
    }

    /// `DATE` as a timestamp; `None` if missing or not RFC 3339.
    pub fn date(&self) -> Option<DateTime<FixedOffset>> {
        self.get("DATE")
            .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
    }

    pub fn has_table(&self) -> bool {
        self.fields.contains_key(TABLE_KEY)
    }

    /// The raw table section. Errors with the API's status when there is none,
    /// which is how e-Stat reports bad ids and empty result sets.
    pub fn table(&self) -> Result<&str> {
        self.get(TABLE_KEY).ok_or_else(|| {
            anyhow!(
                "response has no table section (STATUS={}, ERROR_MSG={})",
                self.status().unwrap_or("-"),
                self.error_msg().unwrap_or("-")
            )
        })
    }

    /// Every entry except the table, sorted by key.
    pub fn metadata(&self) -> BTreeMap<&str, &str> {
        self.fields
            .iter()
            .filter(|(k, _)| k.as_str() != TABLE_KEY)
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    pub fn into_inner(self) -> ParsedResponse {
        self.fields
    }
}

impl From<ParsedResponse> for StatsResponse {
    fn from(fields: ParsedResponse) -> Self {
        Self::new(fields)
    }
}
