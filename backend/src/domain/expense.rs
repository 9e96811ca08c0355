//! Expense records and the rules their mutable fields obey.
//!
//! Validation runs before any record is persisted, so every [`Expense`] in
//! the system carries a non-empty title, a known [`Category`] and a
//! non-negative [`Amount`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;
use crate::domain::ownership::Owned;

pub const TITLE_MAX: usize = 200;
/// Largest accepted amount in whole currency units.
pub const AMOUNT_MAX: i64 = 1_000_000_000;
const AMOUNT_SCALE: u32 = 2;

/// Opaque expense identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(Uuid);

impl ExpenseId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ExpenseId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Fixed set of spending categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Bills & Utilities")]
    BillsAndUtilities,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Travel")]
    Travel,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    pub const ALL: [Self; 9] = [
        Self::FoodAndDining,
        Self::Transportation,
        Self::Shopping,
        Self::Entertainment,
        Self::BillsAndUtilities,
        Self::Healthcare,
        Self::Education,
        Self::Travel,
        Self::Other,
    ];

    /// Display label, also the wire and storage form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FoodAndDining => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::BillsAndUtilities => "Bills & Utilities",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label that matches none of the known categories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// Trimmed, non-empty expense title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseTitle(String);

impl ExpenseTitle {
    pub fn new(raw: &str) -> Result<Self, ExpenseValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ExpenseValidationError::TitleMissing);
        }
        if trimmed.chars().count() > TITLE_MAX {
            return Err(ExpenseValidationError::TitleTooLong { max: TITLE_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Non-negative currency value with at most two fractional digits.
///
/// # Examples
/// ```
/// use expense_tracker::domain::Amount;
/// use rust_decimal::Decimal;
///
/// let amount = Amount::new(Decimal::new(450, 2)).unwrap();
/// assert_eq!(amount.minor_units(), 450);
/// assert!(Amount::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self, ExpenseValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ExpenseValidationError::AmountNegative);
        }
        let value = value.normalize();
        if value.scale() > AMOUNT_SCALE {
            return Err(ExpenseValidationError::AmountTooPrecise);
        }
        if value > Decimal::from(AMOUNT_MAX) {
            return Err(ExpenseValidationError::AmountTooLarge { max: AMOUNT_MAX });
        }
        Ok(Self(value.abs()))
    }

    /// Rebuild from the integer cents representation used in storage.
    pub fn from_minor_units(minor: i64) -> Result<Self, ExpenseValidationError> {
        Self::new(Decimal::new(minor, AMOUNT_SCALE))
    }

    pub fn minor_units(self) -> i64 {
        // Bounded by AMOUNT_MAX * 100, well inside i64.
        (self.0 * Decimal::ONE_HUNDRED).to_i64().unwrap_or_default()
    }

    pub fn value(self) -> Decimal {
        self.0
    }
}

/// Amount as read from a request, before range checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawAmount {
    Missing,
    NotANumber,
    Value(Decimal),
}

/// Single field-level rejection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpenseValidationError {
    #[error("Title is required")]
    TitleMissing,
    #[error("Title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("Category is required")]
    CategoryMissing,
    #[error("Category must be one of the known categories")]
    CategoryUnknown,
    #[error("Amount is required")]
    AmountMissing,
    #[error("Amount must be a number")]
    AmountNotANumber,
    #[error("Amount must not be negative")]
    AmountNegative,
    #[error("Amount must have at most two decimal places")]
    AmountTooPrecise,
    #[error("Amount must be at most {max}")]
    AmountTooLarge { max: i64 },
}

impl ExpenseValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::TitleMissing | Self::TitleTooLong { .. } => "title",
            Self::CategoryMissing | Self::CategoryUnknown => "category",
            Self::AmountMissing
            | Self::AmountNotANumber
            | Self::AmountNegative
            | Self::AmountTooPrecise
            | Self::AmountTooLarge { .. } => "amount",
        }
    }

    /// Machine-readable reason, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TitleMissing | Self::CategoryMissing | Self::AmountMissing => "required",
            Self::TitleTooLong { .. } => "too_long",
            Self::CategoryUnknown => "unknown_category",
            Self::AmountNotANumber => "not_a_number",
            Self::AmountNegative => "negative",
            Self::AmountTooPrecise => "too_precise",
            Self::AmountTooLarge { .. } => "too_large",
        }
    }
}

/// Unvalidated input for create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub title: Option<String>,
    pub category: Option<String>,
    pub amount: RawAmount,
}

impl ExpenseDraft {
    /// Check every field, reporting all failures at once.
    pub fn validate(self) -> Result<ExpenseFields, Vec<ExpenseValidationError>> {
        let mut errors = Vec::new();

        let title = match self.title.as_deref() {
            None => Err(ExpenseValidationError::TitleMissing),
            Some(raw) => ExpenseTitle::new(raw),
        };
        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") => Err(ExpenseValidationError::CategoryMissing),
            Some(label) => label
                .parse::<Category>()
                .map_err(|_| ExpenseValidationError::CategoryUnknown),
        };
        let amount = match self.amount {
            RawAmount::Missing => Err(ExpenseValidationError::AmountMissing),
            RawAmount::NotANumber => Err(ExpenseValidationError::AmountNotANumber),
            RawAmount::Value(value) => Amount::new(value),
        };

        let title = title.map_err(|e| errors.push(e)).ok();
        let category = category.map_err(|e| errors.push(e)).ok();
        let amount = amount.map_err(|e| errors.push(e)).ok();

        match (title, category, amount) {
            (Some(title), Some(category), Some(amount)) => Ok(ExpenseFields {
                title,
                category,
                amount,
            }),
            _ => Err(errors),
        }
    }
}

/// The three caller-controlled fields, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseFields {
    pub title: ExpenseTitle,
    pub category: Category,
    pub amount: Amount,
}

/// A persisted expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    id: ExpenseId,
    owner_id: UserId,
    title: ExpenseTitle,
    category: Category,
    amount: Amount,
    created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        id: ExpenseId,
        owner_id: UserId,
        fields: ExpenseFields,
        created_at: DateTime<Utc>,
    ) -> Self {
        let ExpenseFields {
            title,
            category,
            amount,
        } = fields;
        Self {
            id,
            owner_id,
            title,
            category,
            amount,
            created_at,
        }
    }

    /// Replace the mutable fields; identity, owner and timestamp stay put.
    #[must_use]
    pub fn revise(self, fields: ExpenseFields) -> Self {
        Self::new(self.id, self.owner_id, fields, self.created_at)
    }

    pub fn id(&self) -> ExpenseId {
        self.id
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn title(&self) -> &ExpenseTitle {
        &self.title
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Owned for Expense {
    fn owner_id(&self) -> &UserId {
        &self.owner_id
    }
}

#[cfg(test)]
#[path = "expense_tests.rs"]
mod tests;
