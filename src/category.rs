//! Transaction kinds and the fixed category lists that go with them.
//!
//! The category lists are deliberately fixed rather than user-editable: a
//! category is only meaningful in combination with the kind it belongs to,
//! and the dashboard relies on the lists being stable.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The categories a transaction may have when its kind is income.
pub const INCOME_CATEGORIES: &[&str] = &["Salary", "Freelance", "Investment", "Other"];

/// The categories a transaction may have when its kind is expense.
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Other",
];

/// Whether a transaction adds money or takes money away.
///
/// The sign of a transaction is carried solely by its kind; amounts are
/// stored as non-negative magnitudes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in.
    Income,
    /// Money going out. The default, matching the add-transaction form.
    #[default]
    Expense,
}

impl TransactionKind {
    /// The kind as the lowercase string stored in the database and used in
    /// form values.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// The kind as a capitalized label for display.
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }

    /// The fixed category list for this kind.
    pub fn categories(self) -> &'static [&'static str] {
        match self {
            TransactionKind::Income => INCOME_CATEGORIES,
            TransactionKind::Expense => EXPENSE_CATEGORIES,
        }
    }

    /// Parse the lowercase string representation produced by [Self::as_str].
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The error returned when a category string is not in the fixed list for a
/// transaction kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{category}\" is not a valid {kind} category")]
pub struct CategoryError {
    /// The rejected category string.
    pub category: String,
    /// The kind whose list was checked.
    pub kind: TransactionKind,
}

/// A category name validated against the fixed list for a transaction kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category(String);

impl Category {
    /// Validate `raw` against the category list for `kind`.
    ///
    /// # Errors
    /// Returns a [CategoryError] if `raw` is empty or not a member of the
    /// list for `kind`. The check is repeated here regardless of what the
    /// form offered, so a hand-crafted request cannot smuggle in a category
    /// from the other kind's list.
    pub fn new(raw: &str, kind: TransactionKind) -> Result<Self, CategoryError> {
        if kind.categories().contains(&raw) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(CategoryError {
                category: raw.to_owned(),
                kind,
            })
        }
    }

    /// Create a category without checking membership.
    ///
    /// Intended for strings coming out of a trusted source such as the
    /// application's database.
    pub fn new_unchecked(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The category as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
