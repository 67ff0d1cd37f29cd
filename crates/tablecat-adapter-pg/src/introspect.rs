//! Catalog-introspection queries against `information_schema`.
//!
//! Rows are shaped like the generic table/column enumerations: table types
//! are reported as `TABLE` / `VIEW`, sizes and scales as text.

use sqlx::postgres::PgRow;
use sqlx::{PgConnection, Row};
use tablecat_runtime::{ColumnRow, DriverError, DriverErrorKind, TableRow};

use crate::to_driver_error;

const TABLES_SQL: &str = r#"
    select
      t.table_schema::text as table_schema,
      t.table_name::text as table_name,
      case t.table_type when 'BASE TABLE' then 'TABLE' else t.table_type::text end as table_type,
      obj_description(format('%I.%I', t.table_schema, t.table_name)::regclass, 'pg_class') as remarks
    from information_schema.tables t
    where t.table_schema = $1
      and ($2::text is null or t.table_name like $2)
      and (case t.table_type when 'BASE TABLE' then 'TABLE' else t.table_type::text end) = any($3)
    order by t.table_name
"#;

const COLUMNS_SQL: &str = r#"
    select
      c.column_name::text as column_name,
      upper(case when c.data_type in ('USER-DEFINED', 'ARRAY') then c.udt_name else c.data_type end::text) as type_name,
      (case
         when c.character_maximum_length is not null then c.character_maximum_length
         when c.data_type = 'numeric' then c.numeric_precision
       end)::text as column_size,
      (case when c.data_type = 'numeric' then c.numeric_scale end)::text as decimal_digits,
      c.is_nullable::text as is_nullable,
      c.column_default::text as column_def,
      col_description(format('%I.%I', c.table_schema, c.table_name)::regclass, c.ordinal_position::int) as remarks
    from information_schema.columns c
    where c.table_schema = $1
      and c.table_name = $2
      and c.column_name like $3
    order by c.ordinal_position
"#;

pub(crate) async fn tables(
    conn: &mut PgConnection,
    schema: &str,
    table_pattern: Option<&str>,
    types: &[&str],
) -> Result<Vec<TableRow>, DriverError> {
    let types: Vec<String> = types.iter().map(|t| t.to_string()).collect();
    let rows = sqlx::query(TABLES_SQL)
        .bind(schema)
        .bind(table_pattern)
        .bind(types)
        .fetch_all(conn)
        .await
        .map_err(|e| to_driver_error(DriverErrorKind::Query, e))?;

    rows.iter().map(table_row).collect()
}

pub(crate) async fn columns(
    conn: &mut PgConnection,
    schema: &str,
    table: &str,
    column_pattern: &str,
) -> Result<Vec<ColumnRow>, DriverError> {
    let rows = sqlx::query(COLUMNS_SQL)
        .bind(schema)
        .bind(table)
        .bind(column_pattern)
        .fetch_all(conn)
        .await
        .map_err(|e| to_driver_error(DriverErrorKind::Query, e))?;

    rows.iter().map(column_row).collect()
}

fn table_row(row: &PgRow) -> Result<TableRow, DriverError> {
    Ok(TableRow {
        table_schema: get(row, "table_schema")?,
        table_name: get(row, "table_name")?,
        table_type: get(row, "table_type")?,
        remarks: get(row, "remarks")?,
    })
}

fn column_row(row: &PgRow) -> Result<ColumnRow, DriverError> {
    Ok(ColumnRow {
        column_name: get(row, "column_name")?,
        type_name: get(row, "type_name")?,
        column_size: get(row, "column_size")?,
        decimal_digits: get(row, "decimal_digits")?,
        is_nullable: get(row, "is_nullable")?,
        column_def: get(row, "column_def")?,
        remarks: get(row, "remarks")?,
    })
}

fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DriverError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| to_driver_error(DriverErrorKind::Query, e))
}
