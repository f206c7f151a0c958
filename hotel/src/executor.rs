use std::io::Write;

use abi::HotelError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::{
    postgres::{types::PgInterval, PgArguments, PgRow},
    query::Query,
    types::{Decimal, Uuid},
    Column, Executor, Postgres, Row, TypeInfo,
};
use tracing::debug;

use crate::HotelManager;

/// A positional statement parameter, bound as `$1`, `$2`, ... in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i32),
    BigInt(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        Self::BigInt(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

/// Rows of a query with every value rendered as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    /// empty when the query returned no rows
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [SqlValue],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = match param {
            SqlValue::Int(v) => query.bind(*v),
            SqlValue::BigInt(v) => query.bind(*v),
            SqlValue::Float(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.as_str()),
            SqlValue::Date(v) => query.bind(*v),
        };
    }
    query
}

/// Run a statement for its effect, returns the number of affected rows.
pub async fn execute<'c, E>(executor: E, sql: &str, params: &[SqlValue]) -> Result<u64, HotelError>
where
    E: Executor<'c, Database = Postgres>,
{
    debug!(sql, "execute");
    let result = bind_params(sqlx::query(sql), params)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Run a query and count its rows.
pub async fn query_count<'c, E>(
    executor: E,
    sql: &str,
    params: &[SqlValue],
) -> Result<usize, HotelError>
where
    E: Executor<'c, Database = Postgres>,
{
    debug!(sql, "query count");
    let rows = bind_params(sqlx::query(sql), params)
        .fetch_all(executor)
        .await?;
    Ok(rows.len())
}

/// Run a query and render every row as strings, column order preserved.
pub async fn query_rows<'c, E>(
    executor: E,
    sql: &str,
    params: &[SqlValue],
) -> Result<QueryResult, HotelError>
where
    E: Executor<'c, Database = Postgres>,
{
    debug!(sql, "query rows");
    let rows = bind_params(sqlx::query(sql), params)
        .fetch_all(executor)
        .await?;

    let columns = rows
        .first()
        .map(|row| {
            row.columns()
                .iter()
                .map(|col| col.name().to_string())
                .collect()
        })
        .unwrap_or_default();

    let rows = rows
        .iter()
        .map(|row| {
            (0..row.len())
                .map(|i| column_to_string(row, i))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QueryResult { columns, rows })
}

fn column_to_string(row: &PgRow, index: usize) -> Result<String, HotelError> {
    let value = match row.column(index).type_info().name() {
        "BOOL" => row.try_get::<Option<bool>, _>(index)?.map(|v| v.to_string()),
        "INT2" => row.try_get::<Option<i16>, _>(index)?.map(|v| v.to_string()),
        "INT4" => row.try_get::<Option<i32>, _>(index)?.map(|v| v.to_string()),
        "INT8" => row.try_get::<Option<i64>, _>(index)?.map(|v| v.to_string()),
        "FLOAT4" => row.try_get::<Option<f32>, _>(index)?.map(|v| v.to_string()),
        "FLOAT8" => row.try_get::<Option<f64>, _>(index)?.map(|v| v.to_string()),
        "NUMERIC" => row
            .try_get::<Option<Decimal>, _>(index)?
            .map(|v| v.normalize().to_string()),
        "TEXT" | "VARCHAR" | "CHAR" | "BPCHAR" | "NAME" => row.try_get::<Option<String>, _>(index)?,
        "UUID" => row.try_get::<Option<Uuid>, _>(index)?.map(|v| v.to_string()),
        "TIME" => row
            .try_get::<Option<NaiveTime>, _>(index)?
            .map(|v| v.to_string()),
        "INTERVAL" => row
            .try_get::<Option<PgInterval>, _>(index)?
            .map(|v| interval_to_string(&v)),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(index)?
            .map(|v| v.to_string()),
        "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(index)?
            .map(|v| v.to_string()),
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(index)?
            .map(|v| v.to_string()),
        other => return Err(HotelError::UnsupportedColumn(other.to_string())),
    };

    Ok(value.unwrap_or_else(|| "null".to_string()))
}

/// `1 mons 2 days 00:00:03.5` style, zero parts left out.
fn interval_to_string(v: &PgInterval) -> String {
    let mut parts = Vec::new();
    if v.months != 0 {
        parts.push(format!("{} mons", v.months));
    }
    if v.days != 0 {
        parts.push(format!("{} days", v.days));
    }
    if v.microseconds != 0 || parts.is_empty() {
        let sign = if v.microseconds < 0 { "-" } else { "" };
        let micros = v.microseconds.unsigned_abs();
        let secs = micros / 1_000_000;
        let mut time = format!(
            "{}{:02}:{:02}:{:02}",
            sign,
            secs / 3600,
            secs / 60 % 60,
            secs % 60
        );
        let frac = micros % 1_000_000;
        if frac != 0 {
            let digits = format!("{:06}", frac);
            time.push('.');
            time.push_str(digits.trim_end_matches('0'));
        }
        parts.push(time);
    }
    parts.join(" ")
}

impl HotelManager {
    pub async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<u64, HotelError> {
        execute(&self.pool, sql, params).await
    }

    pub async fn query_count(&self, sql: &str, params: &[SqlValue]) -> Result<usize, HotelError> {
        query_count(&self.pool, sql, params).await
    }

    pub async fn query_rows(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<QueryResult, HotelError> {
        query_rows(&self.pool, sql, params).await
    }

    /// Print a header line and then one line per row, values tab separated.
    /// Nothing is printed for an empty result.
    pub async fn query_print(
        &self,
        sql: &str,
        params: &[SqlValue],
        out: &mut (dyn Write + Send),
    ) -> Result<usize, HotelError> {
        let result = self.query_rows(sql, params).await?;
        if result.rows.is_empty() {
            return Ok(0);
        }

        for column in &result.columns {
            write!(out, "{}\t", column)?;
        }
        writeln!(out)?;
        for row in &result.rows {
            for value in row {
                write!(out, "{}\t", value)?;
            }
            writeln!(out)?;
        }

        Ok(result.rows.len())
    }
}
