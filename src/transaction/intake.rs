//! Validates and normalizes candidate transactions before they are forwarded
//! to the transaction store.
//!
//! Rejected drafts never reach the store; the caller surfaces the error to
//! the user before any write is attempted. On success the intake path stamps
//! the creation time and the owning user, so neither can be supplied (or
//! spoofed) by the client.

use time::OffsetDateTime;

use crate::{
    category::{Category, CategoryError, TransactionKind},
    transaction::NewTransaction,
    user::UserID,
};

/// The form field an intake rejection points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationField {
    /// The free-text description.
    Description,
    /// The raw amount text.
    Amount,
    /// The category select.
    Category,
}

/// The reasons the intake validator rejects a candidate transaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The description was empty or whitespace-only.
    #[error("Description cannot be empty")]
    EmptyDescription,

    /// The amount text did not parse as a number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The amount parsed but was negative. Amounts are magnitudes; direction
    /// is carried by the transaction kind.
    #[error("Amount cannot be negative")]
    NegativeAmount,

    /// The category was empty or not in the fixed list for the chosen kind.
    #[error(transparent)]
    InvalidCategory(#[from] CategoryError),
}

impl ValidationError {
    /// The field that failed validation.
    pub fn field(&self) -> ValidationField {
        match self {
            ValidationError::EmptyDescription => ValidationField::Description,
            ValidationError::InvalidAmount(_) | ValidationError::NegativeAmount => {
                ValidationField::Amount
            }
            ValidationError::InvalidCategory(_) => ValidationField::Category,
        }
    }
}

/// A candidate transaction as the user submitted it.
///
/// The amount is kept as raw text so that parse failures are reported as
/// validation errors rather than as form deserialization failures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionDraft {
    /// The user-supplied description.
    pub description: String,
    /// The user-supplied amount text, e.g. "4.50".
    pub amount: String,
    /// Whether the user chose income or expense.
    pub kind: TransactionKind,
    /// The user-supplied category string.
    pub category: String,
}

/// Validate `draft` and produce the normalized payload for the store.
///
/// `owner` must come from the authenticated session and `created_at` from
/// the server clock; both are stamped here and never read from the draft.
///
/// # Errors
/// Returns the first failing check as a [ValidationError]:
/// - [ValidationError::EmptyDescription] for an empty or whitespace-only
///   description,
/// - [ValidationError::InvalidAmount] or [ValidationError::NegativeAmount]
///   when the amount does not parse to a finite non-negative number,
/// - [ValidationError::InvalidCategory] when the category is not in the
///   fixed list for `draft.kind`. The membership check runs regardless of
///   what the form offered, so it holds even against hand-crafted requests.
pub fn validate(
    draft: &TransactionDraft,
    owner: UserID,
    created_at: OffsetDateTime,
) -> Result<NewTransaction, ValidationError> {
    let description = draft.description.trim();
    if description.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }

    let raw_amount = draft.amount.trim();
    let amount: f64 = raw_amount
        .parse()
        .map_err(|_| ValidationError::InvalidAmount(raw_amount.to_owned()))?;

    if !amount.is_finite() {
        return Err(ValidationError::InvalidAmount(raw_amount.to_owned()));
    }

    if amount < 0.0 {
        return Err(ValidationError::NegativeAmount);
    }

    let category = Category::new(draft.category.trim(), draft.kind)?;

    Ok(NewTransaction {
        owner,
        description: description.to_owned(),
        amount,
        kind: draft.kind,
        category,
        created_at,
    })
}

#[cfg(test)]
mod intake_tests {
    use time::macros::datetime;

    use crate::{
        category::TransactionKind,
        user::UserID,
    };

    use super::{TransactionDraft, ValidationError, ValidationField, validate};

    fn draft(description: &str, amount: &str, kind: TransactionKind, category: &str) -> TransactionDraft {
        TransactionDraft {
            description: description.to_owned(),
            amount: amount.to_owned(),
            kind,
            category: category.to_owned(),
        }
    }

    fn owner() -> UserID {
        UserID::new(7)
    }

    #[test]
    fn rejects_empty_description() {
        let result = validate(
            &draft("", "10", TransactionKind::Expense, "Food"),
            owner(),
            datetime!(2025-10-05 12:00 UTC),
        );

        assert_eq!(result, Err(ValidationError::EmptyDescription));
        assert_eq!(result.unwrap_err().field(), ValidationField::Description);
    }

    #[test]
    fn rejects_whitespace_only_description() {
        let result = validate(
            &draft("   \t", "10", TransactionKind::Expense, "Food"),
            owner(),
            datetime!(2025-10-05 12:00 UTC),
        );

        assert_eq!(result, Err(ValidationError::EmptyDescription));
    }

    #[test]
    fn rejects_negative_amount() {
        let result = validate(
            &draft("Coffee", "-5", TransactionKind::Expense, "Food"),
            owner(),
            datetime!(2025-10-05 12:00 UTC),
        );

        assert_eq!(result, Err(ValidationError::NegativeAmount));
        assert_eq!(result.unwrap_err().field(), ValidationField::Amount);
    }

    #[test]
    fn rejects_unparseable_amount() {
        let result = validate(
            &draft("Coffee", "ten dollars", TransactionKind::Expense, "Food"),
            owner(),
            datetime!(2025-10-05 12:00 UTC),
        );

        assert_eq!(
            result,
            Err(ValidationError::InvalidAmount("ten dollars".to_owned()))
        );
        assert_eq!(result.unwrap_err().field(), ValidationField::Amount);
    }

    #[test]
    fn rejects_non_finite_amount() {
        // "inf" parses as f64 infinity, which must not be accepted.
        let result = validate(
            &draft("Coffee", "inf", TransactionKind::Expense, "Food"),
            owner(),
            datetime!(2025-10-05 12:00 UTC),
        );

        assert_eq!(result.unwrap_err().field(), ValidationField::Amount);
    }

    #[test]
    fn rejects_category_from_other_kinds_list() {
        let result = validate(
            &draft("Coffee", "5", TransactionKind::Expense, "Salary"),
            owner(),
            datetime!(2025-10-05 12:00 UTC),
        );

        assert_eq!(result.unwrap_err().field(), ValidationField::Category);
    }

    #[test]
    fn rejects_empty_category() {
        let result = validate(
            &draft("Coffee", "5", TransactionKind::Expense, ""),
            owner(),
            datetime!(2025-10-05 12:00 UTC),
        );

        assert_eq!(result.unwrap_err().field(), ValidationField::Category);
    }

    #[test]
    fn accepts_valid_draft_and_stamps_owner_and_time() {
        let created_at = datetime!(2025-10-05 12:00 UTC);

        let new_transaction = validate(
            &draft("Coffee", "4.5", TransactionKind::Expense, "Food"),
            owner(),
            created_at,
        )
        .unwrap();

        assert_eq!(new_transaction.description, "Coffee");
        assert_eq!(new_transaction.amount, 4.5);
        assert_eq!(new_transaction.kind, TransactionKind::Expense);
        assert_eq!(new_transaction.category.as_str(), "Food");
        assert_eq!(new_transaction.owner, owner());
        assert_eq!(new_transaction.created_at, created_at);
    }

    #[test]
    fn trims_description_whitespace() {
        let new_transaction = validate(
            &draft("  Coffee  ", "4.5", TransactionKind::Expense, "Food"),
            owner(),
            datetime!(2025-10-05 12:00 UTC),
        )
        .unwrap();

        assert_eq!(new_transaction.description, "Coffee");
    }
}
