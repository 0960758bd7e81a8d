// SPDX-License-Identifier: MIT
// Copyright 2026 Deedsie contributors

//! Shared helpers for date/time formatting.
//!
//! Timestamps are stored as RFC3339 strings so Firestore's lexicographic
//! ordering matches chronological ordering; streak dates use `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Current UTC timestamp as an RFC3339 string.
pub fn now_rfc3339() -> String {
    format_utc_rfc3339(Utc::now())
}

/// Current UTC calendar date.
pub fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Format a date as ISO `YYYY-MM-DD`, the `lastDeedDate` wire format.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
