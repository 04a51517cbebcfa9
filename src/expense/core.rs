//! Defines the core data models and database queries for expenses.

use rusqlite::{Connection, Row, types::Type};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{Error, ValidationError, database_id::ExpenseId};

// ============================================================================
// MODELS
// ============================================================================

/// Money that was spent, along with how the spender felt at the time.
///
/// Expenses are created with [create_expense] and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// The amount of money spent.
    ///
    /// Negative amounts are allowed and represent refunds or adjustments.
    pub amount: f64,
    /// A free-text label for the emotional state at the time of spending, e.g. "happy".
    pub emotion: String,
    /// Why the money was spent, if the spender gave a reason.
    pub reason: Option<String>,
    /// When the expense was recorded, set by the database.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A validated expense that is ready to be inserted into the database.
///
/// The only way to get a `NewExpense` is through [NewExpense::new], so holding
/// one means the amount and emotion have already been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    amount: f64,
    emotion: String,
    reason: Option<String>,
}

impl NewExpense {
    /// Validate the fields of a new expense.
    ///
    /// The emotion is kept exactly as given: it is neither trimmed nor
    /// normalised, so `"Sad"` and `"sad"` are different emotions.
    ///
    /// # Errors
    /// This function will return a:
    /// - [ValidationError::NonFiniteAmount] if `amount` is NaN or infinite,
    /// - or [ValidationError::EmptyEmotion] if `emotion` is an empty string.
    pub fn new(
        amount: f64,
        emotion: impl Into<String>,
        reason: Option<String>,
    ) -> Result<Self, ValidationError> {
        if !amount.is_finite() {
            return Err(ValidationError::NonFiniteAmount);
        }

        let emotion = emotion.into();

        if emotion.is_empty() {
            return Err(ValidationError::EmptyEmotion);
        }

        Ok(Self {
            amount,
            emotion,
            reason,
        })
    }

    /// The amount of money spent.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The emotion associated with the expense.
    pub fn emotion(&self) -> &str {
        &self.emotion
    }

    /// The reason for the expense, if any.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Insert a new expense into the database and return the stored record.
///
/// The database assigns the ID and the creation time.
///
/// # Errors
/// This function will return a [Error::Storage] if the expense could not be written.
pub fn create_expense(new_expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "INSERT INTO expense (amount, emotion, reason)
             VALUES (?1, ?2, ?3)
             RETURNING id, amount, emotion, reason, created_at",
        )?
        .query_one(
            (new_expense.amount, new_expense.emotion, new_expense.reason),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve every expense in the database, most recent first.
///
/// Expenses created within the same millisecond are ordered by ID, newest
/// first, so repeated reads of an unchanged table return the same order.
///
/// # Errors
/// This function will return a [Error::Storage] if the expenses could not be read.
pub fn list_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    let mut statement = connection.prepare(
        "SELECT id, amount, emotion, reason, created_at FROM expense
         ORDER BY created_at DESC, id DESC",
    )?;

    let expenses = statement
        .query_map([], map_expense_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(expenses)
}

/// Get the total number of expenses in the database.
///
/// # Errors
/// This function will return a [Error::Storage] if there is some SQL error.
pub fn count_expenses(connection: &Connection) -> Result<u64, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expense;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the expense table in the database.
///
/// `created_at` is filled in by SQLite as a UTC RFC 3339 timestamp with
/// millisecond precision. The fixed width means the text sorts chronologically.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                emotion TEXT NOT NULL CHECK (emotion <> ''),
                reason TEXT,
                created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_created_at ON expense(created_at);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an Expense.
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let emotion = row.get(2)?;
    let reason = row.get(3)?;
    let created_at: String = row.get(4)?;
    let created_at = OffsetDateTime::parse(&created_at, &Rfc3339).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(error))
    })?;

    Ok(Expense {
        id,
        amount,
        emotion,
        reason,
        created_at,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod validation_tests {
    use crate::{ValidationError, expense::NewExpense};

    #[test]
    fn accepts_valid_expense() {
        let new_expense = NewExpense::new(12.5, "happy", Some("coffee".to_owned())).unwrap();

        assert_eq!(new_expense.amount(), 12.5);
        assert_eq!(new_expense.emotion(), "happy");
        assert_eq!(new_expense.reason(), Some("coffee"));
    }

    #[test]
    fn accepts_negative_amount() {
        let result = NewExpense::new(-20.0, "relieved", Some("refund".to_owned()));

        assert!(result.is_ok(), "want negative amount to be accepted, got {result:?}");
    }

    #[test]
    fn rejects_empty_emotion() {
        let result = NewExpense::new(1.0, "", None);

        assert_eq!(result, Err(ValidationError::EmptyEmotion));
    }

    #[test]
    fn keeps_whitespace_emotion_as_is() {
        let new_expense = NewExpense::new(1.0, " sad ", None).unwrap();

        assert_eq!(new_expense.emotion(), " sad ");
    }

    #[test]
    fn rejects_non_finite_amounts() {
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = NewExpense::new(amount, "happy", None);

            assert_eq!(
                result,
                Err(ValidationError::NonFiniteAmount),
                "want {amount} to be rejected"
            );
        }
    }
}

#[cfg(test)]
mod database_tests {
    use std::collections::HashSet;

    use rusqlite::Connection;
    use time::OffsetDateTime;

    use crate::{
        Error,
        db::initialize,
        expense::{NewExpense, count_expenses, create_expense, list_expenses},
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn new_expense(amount: f64, emotion: &str, reason: Option<&str>) -> NewExpense {
        NewExpense::new(amount, emotion, reason.map(str::to_owned)).unwrap()
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();
        let before = OffsetDateTime::now_utc();

        let result = create_expense(new_expense(12.5, "happy", Some("coffee")), &conn);

        match result {
            Ok(expense) => {
                assert_eq!(expense.id, 1);
                assert_eq!(expense.amount, 12.5);
                assert_eq!(expense.emotion, "happy");
                assert_eq!(expense.reason.as_deref(), Some("coffee"));
                // The stored timestamp is truncated to the millisecond.
                assert!(
                    expense.created_at >= before - time::Duration::milliseconds(1),
                    "created_at {} is earlier than {before}",
                    expense.created_at
                );
            }
            Err(error) => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn create_without_reason() {
        let conn = get_test_connection();

        let expense = create_expense(new_expense(40.0, "sad", None), &conn).unwrap();

        assert_eq!(expense.reason, None);
    }

    #[test]
    fn create_assigns_unique_ids() {
        let conn = get_test_connection();

        let ids: HashSet<_> = (0..10)
            .map(|i| {
                create_expense(new_expense(i as f64, "calm", None), &conn)
                    .unwrap()
                    .id
            })
            .collect();

        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn created_expense_is_listed_once() {
        let conn = get_test_connection();
        create_expense(new_expense(5.0, "bored", None), &conn).unwrap();

        let created =
            create_expense(new_expense(-3.25, "guilty", Some("returned")), &conn).unwrap();

        let expenses = list_expenses(&conn).unwrap();
        let matches: Vec<_> = expenses.iter().filter(|e| e.id == created.id).collect();
        assert_eq!(matches, vec![&created]);
        assert_eq!(expenses.len(), 2);
    }

    #[test]
    fn list_empty_table() {
        let conn = get_test_connection();

        let expenses = list_expenses(&conn).unwrap();

        assert!(expenses.is_empty(), "want no expenses, got {expenses:?}");
    }

    #[test]
    fn list_newest_first() {
        let conn = get_test_connection();
        create_expense(new_expense(12.5, "happy", Some("coffee")), &conn).unwrap();
        create_expense(new_expense(40.0, "sad", None), &conn).unwrap();

        let expenses = list_expenses(&conn).unwrap();

        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].emotion, "sad");
        assert_eq!(expenses[0].amount, 40.0);
        assert_eq!(expenses[1].emotion, "happy");
        assert_eq!(expenses[1].reason.as_deref(), Some("coffee"));
    }

    #[test]
    fn list_orders_by_created_at_then_id() {
        let conn = get_test_connection();
        conn.execute(
            "INSERT INTO expense (amount, emotion, created_at) VALUES
                (1.0, 'old', '2025-01-01T00:00:00.000Z'),
                (2.0, 'new', '2025-06-01T00:00:00.000Z'),
                (3.0, 'tie', '2025-06-01T00:00:00.000Z')",
            (),
        )
        .unwrap();

        let emotions: Vec<_> = list_expenses(&conn)
            .unwrap()
            .into_iter()
            .map(|expense| expense.emotion)
            .collect();

        assert_eq!(emotions, vec!["tie", "new", "old"]);
    }

    #[test]
    fn list_is_stable_between_reads() {
        let conn = get_test_connection();
        for i in 0..20 {
            create_expense(new_expense(i as f64, "same", None), &conn).unwrap();
        }

        let first = list_expenses(&conn).unwrap();
        let second = list_expenses(&conn).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn get_count() {
        let conn = get_test_connection();
        let want_count = 20;
        for i in 1..=want_count {
            create_expense(new_expense(i as f64, "happy", None), &conn)
                .expect("Could not create expense");
        }

        let got_count = count_expenses(&conn).expect("Could not get count");

        assert_eq!(want_count, got_count);
    }

    #[test]
    fn count_empty_table() {
        let conn = get_test_connection();

        assert_eq!(count_expenses(&conn).unwrap(), 0u64);
    }

    #[test]
    fn create_fails_without_table() {
        let conn = Connection::open_in_memory().unwrap();

        let result = create_expense(new_expense(1.0, "anxious", None), &conn);

        assert!(
            matches!(result, Err(Error::Storage(_))),
            "want storage error, got {result:?}"
        );
    }

    #[test]
    fn list_fails_without_table() {
        let conn = Connection::open_in_memory().unwrap();

        let result = list_expenses(&conn);

        assert!(
            matches!(result, Err(Error::Storage(_))),
            "want storage error, got {result:?}"
        );
    }
}
