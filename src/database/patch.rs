//! Partial updates driven by a JSON object of column → value.
//!
//! Only columns named in an entity's [`PatchSchema`] may be assigned; their
//! names come from the static allow-list, never from the request. Every value
//! is sent as a bind parameter typed after its column, and the row id and
//! owner id are always the last two parameters.

use chrono::{NaiveDate, NaiveTime};
use diesel::{
    pg::Pg,
    prelude::*,
    query_builder::{BoxedSqlQuery, SqlQuery},
    sql_types::{Bool, Date, Double, Integer, Nullable, Text, Time},
};
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    Double,
    Bool,
    Date,
    Time,
}

#[derive(Debug)]
pub struct PatchColumn {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
    pub non_negative: bool,
}

impl PatchColumn {
    pub const fn new(name: &'static str, kind: ColumnKind, nullable: bool) -> Self {
        Self {
            name,
            kind,
            nullable,
            non_negative: false,
        }
    }

    /// Rejects values below zero. Only meaningful for numeric columns.
    pub const fn non_negative(self) -> Self {
        Self {
            non_negative: true,
            ..self
        }
    }
}

#[derive(Debug)]
pub struct PatchSchema {
    pub table: &'static str,
    pub owner_column: &'static str,
    pub columns: &'static [PatchColumn],
}

#[derive(Debug, Clone, PartialEq)]
pub enum PatchValue {
    Text(Option<String>),
    Integer(Option<i32>),
    Double(Option<f64>),
    Bool(Option<bool>),
    Date(Option<NaiveDate>),
    Time(Option<NaiveTime>),
}

#[derive(Debug)]
pub struct Patch {
    table: &'static str,
    owner_column: &'static str,
    assignments: Vec<(&'static str, PatchValue)>,
}

impl PatchSchema {
    pub fn build(&self, fields: &Map<String, Value>) -> ApiResult<Patch> {
        if fields.is_empty() {
            return Err(ApiError::bad_request("No fields to update"));
        }
        if let Some(unknown) = fields
            .keys()
            .find(|key| !self.columns.iter().any(|c| c.name == key.as_str()))
        {
            return Err(ApiError::bad_request(format!(
                "Field '{}' cannot be updated",
                unknown
            )));
        }

        let assignments = self
            .columns
            .iter()
            .filter_map(|column| fields.get(column.name).map(|value| (column, value)))
            .map(|(column, value)| Ok((column.name, coerce(column, value)?)))
            .collect::<ApiResult<Vec<_>>>()?;

        Ok(Patch {
            table: self.table,
            owner_column: self.owner_column,
            assignments,
        })
    }
}

impl Patch {
    pub fn assignments(&self) -> &[(&'static str, PatchValue)] {
        &self.assignments
    }

    /// `col1 = $1, col2 = $2, ...`
    pub fn set_clause(&self) -> String {
        self.assignments
            .iter()
            .enumerate()
            .map(|(idx, (name, _))| format!("{} = ${}", name, idx + 1))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn statement(&self) -> String {
        let n = self.assignments.len();
        format!(
            "UPDATE {} SET {}, updated_at = CURRENT_TIMESTAMP WHERE id = ${} AND {} = ${} RETURNING *",
            self.table,
            self.set_clause(),
            n + 1,
            self.owner_column,
            n + 2
        )
    }

    /// Runs the update against the row `(id, owner_id)` and returns it, or
    /// `None` when no such row exists.
    pub fn execute<T>(self, conn: &mut PgConnection, id: i32, owner_id: i32) -> QueryResult<Option<T>>
    where
        T: QueryableByName<Pg> + 'static,
    {
        let mut query: BoxedSqlQuery<'static, Pg, SqlQuery> =
            diesel::sql_query(self.statement()).into_boxed();
        for (_, value) in self.assignments {
            query = match value {
                PatchValue::Text(v) => query.bind::<Nullable<Text>, _>(v),
                PatchValue::Integer(v) => query.bind::<Nullable<Integer>, _>(v),
                PatchValue::Double(v) => query.bind::<Nullable<Double>, _>(v),
                PatchValue::Bool(v) => query.bind::<Nullable<Bool>, _>(v),
                PatchValue::Date(v) => query.bind::<Nullable<Date>, _>(v),
                PatchValue::Time(v) => query.bind::<Nullable<Time>, _>(v),
            };
        }
        query
            .bind::<Integer, _>(id)
            .bind::<Integer, _>(owner_id)
            .get_result::<T>(conn)
            .optional()
    }
}

fn coerce(column: &PatchColumn, value: &Value) -> ApiResult<PatchValue> {
    let invalid = || {
        ApiError::bad_request(format!(
            "Invalid value for '{}'",
            column.name
        ))
    };

    if value.is_null() {
        if !column.nullable {
            return Err(ApiError::bad_request(format!(
                "Field '{}' cannot be null",
                column.name
            )));
        }
        return Ok(match column.kind {
            ColumnKind::Text => PatchValue::Text(None),
            ColumnKind::Integer => PatchValue::Integer(None),
            ColumnKind::Double => PatchValue::Double(None),
            ColumnKind::Bool => PatchValue::Bool(None),
            ColumnKind::Date => PatchValue::Date(None),
            ColumnKind::Time => PatchValue::Time(None),
        });
    }

    let value = match (column.kind, value) {
        (ColumnKind::Text, Value::String(s)) => PatchValue::Text(Some(s.clone())),
        (ColumnKind::Integer, Value::Number(n)) => PatchValue::Integer(Some(
            n.as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .ok_or_else(invalid)?,
        )),
        (ColumnKind::Integer, Value::String(s)) => {
            PatchValue::Integer(Some(s.trim().parse().map_err(|_| invalid())?))
        }
        (ColumnKind::Double, Value::Number(n)) => {
            PatchValue::Double(Some(n.as_f64().ok_or_else(invalid)?))
        }
        (ColumnKind::Double, Value::String(s)) => {
            PatchValue::Double(Some(s.trim().parse().map_err(|_| invalid())?))
        }
        (ColumnKind::Bool, Value::Bool(b)) => PatchValue::Bool(Some(*b)),
        (ColumnKind::Bool, Value::String(s)) => {
            PatchValue::Bool(Some(s.trim().parse().map_err(|_| invalid())?))
        }
        (ColumnKind::Date, Value::String(s)) => {
            PatchValue::Date(Some(parse_date(s).ok_or_else(invalid)?))
        }
        (ColumnKind::Time, Value::String(s)) => {
            PatchValue::Time(Some(parse_time(s).ok_or_else(invalid)?))
        }
        _ => return Err(invalid()),
    };

    if column.non_negative && is_negative(&value) {
        return Err(ApiError::bad_request(format!(
            "Field '{}' cannot be negative",
            column.name
        )));
    }
    Ok(value)
}

fn is_negative(value: &PatchValue) -> bool {
    match value {
        PatchValue::Integer(Some(n)) => *n < 0,
        PatchValue::Double(Some(n)) => *n < 0.0,
        _ => false,
    }
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Accepts `HH:MM:SS` and `HH:MM`.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}
