//! Catalog introspection per driver.
//!
//! MySQL and Postgres are read through `information_schema`; SQLite through
//! `sqlite_master` plus `PRAGMA table_info`. Row order follows the catalog's
//! ordinal positions so the rendered schema is stable across calls.

use askql_core::{ColumnInfo, DatabaseDriver, TableInfo};
use sqlx::any::AnyRow;
use sqlx::{AnyPool, Row};

/// Column listing for the MySQL current database.
const MYSQL_COLUMNS: &str = r#"
    SELECT
        TABLE_NAME as table_name,
        COLUMN_NAME as column_name,
        DATA_TYPE as data_type,
        CASE WHEN COLUMN_KEY = 'PRI' THEN 1 ELSE 0 END AS is_primary_key
    FROM information_schema.COLUMNS
    WHERE TABLE_SCHEMA = DATABASE()
    ORDER BY TABLE_NAME, ORDINAL_POSITION
"#;

/// Column listing for the Postgres `public` schema.
const POSTGRES_COLUMNS: &str = r#"
    SELECT
        c.table_name,
        c.column_name,
        c.data_type,
        CASE WHEN pk.column_name IS NOT NULL THEN true ELSE false END AS is_primary_key
    FROM information_schema.columns c
    LEFT JOIN (
        SELECT kcu.table_schema, kcu.table_name, kcu.column_name
        FROM information_schema.table_constraints tc
        JOIN information_schema.key_column_usage kcu
            ON tc.constraint_name = kcu.constraint_name
            AND tc.table_schema = kcu.table_schema
        WHERE tc.constraint_type = 'PRIMARY KEY'
    ) pk ON c.table_schema = pk.table_schema
        AND c.table_name = pk.table_name
        AND c.column_name = pk.column_name
    WHERE c.table_schema = 'public'
    ORDER BY c.table_name, c.ordinal_position
"#;

/// Fetch table and column descriptions from the live catalog.
pub async fn fetch_tables(
    pool: &AnyPool,
    driver: DatabaseDriver,
) -> Result<Vec<TableInfo>, sqlx::Error> {
    match driver {
        DatabaseDriver::Mysql => group_columns(sqlx::query(MYSQL_COLUMNS).fetch_all(pool).await?),
        DatabaseDriver::Postgres => {
            group_columns(sqlx::query(POSTGRES_COLUMNS).fetch_all(pool).await?)
        }
        DatabaseDriver::Sqlite => fetch_sqlite_tables(pool).await,
    }
}

/// Fold ordered (table, column) rows into per-table descriptions.
fn group_columns(rows: Vec<AnyRow>) -> Result<Vec<TableInfo>, sqlx::Error> {
    let mut tables: Vec<TableInfo> = Vec::new();

    for row in rows {
        let table_name: String = row.try_get("table_name")?;
        let column = ColumnInfo {
            name: row.try_get("column_name")?,
            data_type: row.try_get("data_type")?,
            is_primary_key: primary_key_flag(&row),
        };

        match tables.last_mut() {
            Some(last) if last.name == table_name => last.columns.push(column),
            _ => tables.push(TableInfo {
                name: table_name,
                columns: vec![column],
                sample_rows: None,
            }),
        }
    }

    Ok(tables)
}

/// `is_primary_key` arrives as bool from Postgres and as an integer from
/// MySQL; probe both shapes.
fn primary_key_flag(row: &AnyRow) -> bool {
    if let Ok(value) = row.try_get::<bool, _>("is_primary_key") {
        return value;
    }
    if let Ok(value) = row.try_get::<i32, _>("is_primary_key") {
        return value != 0;
    }
    if let Ok(value) = row.try_get::<i64, _>("is_primary_key") {
        return value != 0;
    }
    false
}

async fn fetch_sqlite_tables(pool: &AnyPool) -> Result<Vec<TableInfo>, sqlx::Error> {
    let names = sqlx::query(
        r#"
        SELECT name FROM sqlite_master
        WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
        ORDER BY name
    "#,
    )
    .fetch_all(pool)
    .await?;

    let mut tables = Vec::with_capacity(names.len());

    for name_row in names {
        let table_name: String = name_row.try_get("name")?;

        // pragma_table_info is a table-valued function, so the table name
        // has to be spliced in; single quotes are doubled to keep the
        // pragma argument intact.
        let pragma = format!("PRAGMA table_info('{}')", table_name.replace('\'', "''"));
        let column_rows = sqlx::query(&pragma).fetch_all(pool).await?;

        let columns = column_rows
            .iter()
            .map(|row| {
                let pk = row
                    .try_get::<i64, _>("pk")
                    .or_else(|_| row.try_get::<i32, _>("pk").map(i64::from))
                    .unwrap_or(0);
                Ok(ColumnInfo {
                    name: row.try_get("name")?,
                    data_type: row.try_get("type")?,
                    is_primary_key: pk > 0,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        tables.push(TableInfo {
            name: table_name,
            columns,
            sample_rows: None,
        });
    }

    Ok(tables)
}
