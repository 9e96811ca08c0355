//! Aggregate view over a user's expenses.

use rust_decimal::Decimal;

use crate::domain::{Category, Expense};

/// Running total for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Decimal,
}

/// Totals recomputed from scratch on every request.
///
/// `category_breakdown` lists only categories that occur, in the order they
/// are first met while walking the input. Feed expenses oldest first to get
/// creation order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpenseSummary {
    pub total_amount: Decimal,
    pub total_expenses: u64,
    pub category_breakdown: Vec<CategoryTotal>,
}

impl ExpenseSummary {
    /// Fold `expenses` into totals.
    ///
    /// # Examples
    /// ```
    /// use expense_tracker::domain::{Expense, ExpenseSummary};
    ///
    /// let none: Vec<Expense> = Vec::new();
    /// let summary = ExpenseSummary::from_expenses(&none);
    /// assert_eq!(summary.total_expenses, 0);
    /// assert!(summary.category_breakdown.is_empty());
    /// ```
    pub fn from_expenses<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Self {
        expenses
            .into_iter()
            .fold(Self::default(), |mut summary, expense| {
                let amount = expense.amount().value();
                summary.total_amount += amount;
                summary.total_expenses += 1;
                match summary
                    .category_breakdown
                    .iter_mut()
                    .find(|entry| entry.category == expense.category())
                {
                    Some(entry) => entry.total += amount,
                    None => summary.category_breakdown.push(CategoryTotal {
                        category: expense.category(),
                        total: amount,
                    }),
                }
                summary
            })
    }

    pub fn total_for(&self, category: Category) -> Option<Decimal> {
        self.category_breakdown
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.total)
    }
}
