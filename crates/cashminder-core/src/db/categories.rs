//! Category operations

use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::{Error, Result};
use crate::models::{Category, NEW_ID};
use crate::repository::Repository;

impl Database {
    fn row_to_category(row: &rusqlite::Row) -> rusqlite::Result<Category> {
        Ok(Category {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            color: row.get(3)?,
            is_income: row.get(4)?,
            is_default: row.get(5)?,
        })
    }
}

impl Repository<Category> for Database {
    fn get(&self, id: i64) -> Result<Option<Category>> {
        let conn = self.conn()?;
        let category = conn
            .query_row(
                "SELECT id, user_id, name, color, is_income, is_default FROM categories WHERE id = ?",
                params![id],
                Self::row_to_category,
            )
            .optional()?;
        Ok(category)
    }

    fn list(&self) -> Result<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, color, is_income, is_default FROM categories ORDER BY id",
        )?;
        let categories = stmt
            .query_map([], Self::row_to_category)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    fn save(&self, mut category: Category) -> Result<Category> {
        let conn = self.conn()?;

        if category.id == NEW_ID {
            conn.execute(
                "INSERT INTO categories (user_id, name, color, is_income, is_default) VALUES (?, ?, ?, ?, ?)",
                params![
                    category.user_id,
                    category.name,
                    category.color,
                    category.is_income,
                    category.is_default,
                ],
            )?;
            category.id = conn.last_insert_rowid();
        } else {
            let changed = conn.execute(
                "UPDATE categories SET user_id = ?, name = ?, color = ?, is_income = ?, is_default = ? WHERE id = ?",
                params![
                    category.user_id,
                    category.name,
                    category.color,
                    category.is_income,
                    category.is_default,
                    category.id,
                ],
            )?;
            if changed == 0 {
                return Err(Error::NotFound(format!("category {}", category.id)));
            }
        }

        Ok(category)
    }

    fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM categories WHERE id = ?", params![id])?;
        Ok(deleted > 0)
    }
}
