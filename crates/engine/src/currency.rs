use serde::{Deserialize, Serialize};

use crate::EngineError;

/// ISO-like currency code used to display menu prices.
///
/// Prices are stored as an `i64` number of **minor units** (see
/// [`MoneyCents`](crate::MoneyCents)); the currency only decides how an amount
/// is rendered for people.
///
/// ## Digit grouping
///
/// `INR` groups the integer part the Indian way (`12,34,567.00`): the last
/// three digits, then pairs. `EUR` groups by thousands (`1,234,567.00`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Inr,
    Eur,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Eur => "EUR",
        }
    }

    /// Prefix printed before an amount.
    ///
    /// Kept inside the WinAnsi range so every export backend can draw it.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Inr => "Rs. ",
            Currency::Eur => "€",
        }
    }

    pub(crate) fn group_digits(self, digits: &str) -> String {
        let len = digits.len();
        if len <= 3 {
            return digits.to_string();
        }

        let (head, tail) = digits.split_at(len - 3);
        let group = match self {
            Currency::Inr => 2,
            Currency::Eur => 3,
        };

        let mut parts: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > group {
            parts.push(&head[end - group..end]);
            end -= group;
        }
        parts.push(&head[..end]);
        parts.reverse();

        format!("{},{tail}", parts.join(","))
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "INR" => Ok(Currency::Inr),
            "EUR" => Ok(Currency::Eur),
            other => Err(EngineError::InvalidAmount(format!(
                "unsupported currency: {other}"
            ))),
        }
    }
}
