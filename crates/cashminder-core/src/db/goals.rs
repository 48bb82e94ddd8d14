//! Savings goal operations

use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::{Error, Result};
use crate::models::{SavingsGoal, NEW_ID};
use crate::repository::Repository;

impl Database {
    fn row_to_goal(row: &rusqlite::Row) -> rusqlite::Result<SavingsGoal> {
        Ok(SavingsGoal {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            target_amount: row.get(3)?,
            current_amount: row.get(4)?,
            deadline: row.get(5)?,
            created_at: row.get(6)?,
        })
    }
}

impl Repository<SavingsGoal> for Database {
    fn get(&self, id: i64) -> Result<Option<SavingsGoal>> {
        let conn = self.conn()?;
        let goal = conn
            .query_row(
                r#"
                SELECT id, user_id, name, target_amount, current_amount, deadline, created_at
                FROM savings_goals WHERE id = ?
                "#,
                params![id],
                Self::row_to_goal,
            )
            .optional()?;
        Ok(goal)
    }

    fn list(&self) -> Result<Vec<SavingsGoal>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, name, target_amount, current_amount, deadline, created_at
            FROM savings_goals ORDER BY id
            "#,
        )?;
        let goals = stmt
            .query_map([], Self::row_to_goal)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(goals)
    }

    fn save(&self, mut goal: SavingsGoal) -> Result<SavingsGoal> {
        let conn = self.conn()?;

        if goal.id == NEW_ID {
            conn.execute(
                r#"
                INSERT INTO savings_goals (user_id, name, target_amount, current_amount, deadline, created_at)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
                params![
                    goal.user_id,
                    goal.name,
                    goal.target_amount,
                    goal.current_amount,
                    goal.deadline,
                    goal.created_at,
                ],
            )?;
            goal.id = conn.last_insert_rowid();
        } else {
            let changed = conn.execute(
                r#"
                UPDATE savings_goals
                SET user_id = ?, name = ?, target_amount = ?, current_amount = ?, deadline = ?
                WHERE id = ?
                "#,
                params![
                    goal.user_id,
                    goal.name,
                    goal.target_amount,
                    goal.current_amount,
                    goal.deadline,
                    goal.id,
                ],
            )?;
            if changed == 0 {
                return Err(Error::NotFound(format!("savings goal {}", goal.id)));
            }
        }

        Ok(goal)
    }

    fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM savings_goals WHERE id = ?", params![id])?;
        Ok(deleted > 0)
    }
}
