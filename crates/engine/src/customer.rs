//! Customer and event metadata attached to an exported menu.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A reason customer details cannot go on a booking request.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CustomerIssue {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("phone \"{0}\" is not a valid 10-digit mobile number")]
    InvalidPhone(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomerInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<String>,
    pub event_type: Option<String>,
    pub guest_count: Option<u32>,
}

impl CustomerInfo {
    /// Fields a booking request cannot go without, in form order.
    ///
    /// Blank strings count as missing, as does a guest count of 0.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let blank = |value: &Option<String>| value.as_deref().is_none_or(|v| v.trim().is_empty());

        let mut missing = Vec::new();
        if blank(&self.name) {
            missing.push("name");
        }
        if blank(&self.phone) {
            missing.push("phone");
        }
        if self.guest_count.is_none_or(|count| count == 0) {
            missing.push("guest count");
        }
        if self.event_date.is_none() {
            missing.push("event date");
        }
        if blank(&self.event_type) {
            missing.push("event type");
        }
        if blank(&self.event_time) {
            missing.push("event time");
        }
        missing
    }

    /// `label: value` pairs for every field that is present.
    pub fn details(&self) -> Vec<(&'static str, String)> {
        let mut details = Vec::new();
        let mut push = |label: &'static str, value: Option<String>| {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                details.push((label, value));
            }
        };
        push("Customer", self.name.clone());
        push("Email", self.email.clone());
        push("Phone", self.phone.clone());
        push(
            "Event Date",
            self.event_date.map(|d| d.format("%Y-%m-%d").to_string()),
        );
        push("Event Time", self.event_time.clone());
        push("Event Type", self.event_type.clone());
        push("Guest Count", self.guest_count.map(|c| c.to_string()));
        details
    }

    /// Missing fields in form order, then a malformed phone number.
    ///
    /// A phone is valid when it holds exactly ten digits once whitespace is
    /// removed (`98480 22338`).
    pub fn issues(&self) -> Vec<CustomerIssue> {
        let mut issues: Vec<CustomerIssue> = self
            .missing_fields()
            .into_iter()
            .map(CustomerIssue::Missing)
            .collect();
        let phone = self.phone.as_deref().map(str::trim).unwrap_or_default();
        if !phone.is_empty() && !is_mobile_number(phone) {
            issues.push(CustomerIssue::InvalidPhone(phone.to_string()));
        }
        issues
    }

    pub fn is_empty(&self) -> bool {
        self.details().is_empty()
    }
}

fn is_mobile_number(phone: &str) -> bool {
    let mut digits = 0;
    for c in phone.chars().filter(|c| !c.is_whitespace()) {
        if !c.is_ascii_digit() {
            return false;
        }
        digits += 1;
    }
    digits == 10
}
