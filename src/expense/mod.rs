//! Expense management for the emotion ledger.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model and the validated `NewExpense` input
//! - Database functions for storing and listing expenses
//! - Route handlers for the expense endpoints

mod core;
mod create_endpoint;
mod list_endpoint;

pub use core::{
    Expense, NewExpense, count_expenses, create_expense, create_expense_table, list_expenses,
};
pub use create_endpoint::{ExpenseRequest, create_expense_endpoint};
pub use list_endpoint::list_expenses_endpoint;
