//! Transaction filter builder for constructing dynamic SQL queries
//!
//! Translates a validated `TransactionQuery` into WHERE/ORDER BY/LIMIT
//! clauses plus bound parameters.

use crate::query::{SortField, SortOrder, TransactionQuery};

/// Builder for constructing transaction query filters
///
/// The lifetime `'query` ties the filter to the query it was built from.
pub struct TransactionFilter<'query> {
    query: &'query TransactionQuery,
}

/// Result of building a filter - contains SQL components and parameters
pub struct FilterResult {
    /// WHERE clause including "WHERE" keyword (empty if no conditions)
    pub where_clause: String,
    /// ORDER BY clause including "ORDER BY" keyword
    pub order_clause: String,
    /// LIMIT/OFFSET clause (empty if not paged)
    pub limit_clause: String,
    /// Parameters for the query (boxed for rusqlite compatibility)
    pub params: Vec<Box<dyn rusqlite::ToSql>>,
}

impl<'query> TransactionFilter<'query> {
    pub fn new(query: &'query TransactionQuery) -> Self {
        Self { query }
    }

    /// Build the filter components
    pub fn build(self) -> FilterResult {
        let q = self.query;
        let mut conditions: Vec<&'static str> = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(user_id) = q.user_id {
            conditions.push("t.user_id = ?");
            params.push(Box::new(user_id));
        }

        if let Some(category_id) = q.category_id {
            conditions.push("t.category_id = ?");
            params.push(Box::new(category_id));
        }

        if let Some(direction) = q.direction {
            conditions.push("t.is_income = ?");
            params.push(Box::new(direction.is_income()));
        }

        if let Some((start, end)) = q.date_range {
            conditions.push("t.date >= ? AND t.date <= ?");
            params.push(Box::new(start));
            params.push(Box::new(end));
        }

        if let Some(min) = q.min_amount {
            conditions.push("t.amount >= ?");
            params.push(Box::new(min));
        }

        if let Some(max) = q.max_amount {
            conditions.push("t.amount <= ?");
            params.push(Box::new(max));
        }

        // instr() on lower() keeps LIKE wildcards in the search text literal
        if let Some(term) = q.search_term() {
            conditions.push("instr(lower(t.description), lower(?)) > 0");
            params.push(Box::new(term.to_string()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let order_column = match q.sort {
            SortField::Date => "t.date",
            SortField::Amount => "t.amount",
        };
        let order_dir = match q.order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        let order_clause = format!("ORDER BY {} {}, t.id DESC", order_column, order_dir);

        // SQLite needs a LIMIT before OFFSET; -1 means unbounded
        let limit_clause = match (q.limit, q.offset) {
            (None, None) => String::new(),
            (limit, offset) => {
                params.push(Box::new(limit.map_or(-1, |l| l as i64)));
                params.push(Box::new(offset.unwrap_or(0) as i64));
                "LIMIT ? OFFSET ?".to_string()
            }
        };

        FilterResult {
            where_clause,
            order_clause,
            limit_clause,
            params,
        }
    }
}

impl FilterResult {
    /// Build a SELECT over `columns` from the transactions table
    pub fn build_select_query(&self, columns: &str) -> String {
        format!(
            "SELECT {} FROM transactions t {} {} {}",
            columns, self.where_clause, self.order_clause, self.limit_clause
        )
    }

    /// Get parameter references for query execution
    pub fn params_refs(&self) -> Vec<&dyn rusqlite::ToSql> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }
}
