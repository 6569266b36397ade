//! MSSQL source implementation.
//!
//! Owns the single tiberius connection for the dump run. The catalog
//! query and each table's row cursor run strictly one after another;
//! every result set is fully drained before the next query starts.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use tiberius::{AuthMethod, Client, ColumnData, Config, EncryptionLevel, FromSql, Query};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::{debug, info};

use crate::config::{AuthMode, ConnectionConfig};
use crate::core::literal::{quote_ident, quote_text};
use crate::core::{RowValue, TableDescriptor, TableFilter};
use crate::error::{DumpError, Result};
use crate::source::{RowSet, Source};

/// MSSQL source over a single exclusively-owned connection.
pub struct MssqlSource {
    client: Client<Compat<TcpStream>>,
    schema: String,
}

impl MssqlSource {
    /// Connect to the server described by the configuration.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let tds = build_tds_config(config)?;

        let tcp = TcpStream::connect(tds.get_addr())
            .await
            .map_err(|e| {
                DumpError::Connect(tiberius::error::Error::Io {
                    kind: e.kind(),
                    message: e.to_string(),
                })
            })?;
        tcp.set_nodelay(true).ok();

        let client = Client::connect(tds, tcp.compat_write())
            .await
            .map_err(DumpError::Connect)?;

        info!(
            "Connected to {}:{}/{}",
            config.server, config.port, config.database
        );

        Ok(Self {
            client,
            schema: config.schema.clone(),
        })
    }
}

fn build_tds_config(config: &ConnectionConfig) -> Result<Config> {
    let mut tds = Config::new();
    tds.host(&config.server);
    tds.port(config.port);
    tds.database(&config.database);

    match config.auth {
        AuthMode::Sql => {
            let user = config.user.as_deref().unwrap_or_default();
            let password = config.password.as_deref().unwrap_or_default();
            tds.authentication(AuthMethod::sql_server(user, password));
        }
        #[cfg(feature = "integrated-auth")]
        AuthMode::Integrated => {
            tds.authentication(AuthMethod::Integrated);
        }
        #[cfg(not(feature = "integrated-auth"))]
        AuthMode::Integrated => {
            return Err(DumpError::Config(
                "integrated authentication requires the 'integrated-auth' feature".into(),
            ));
        }
    }

    if config.encrypt {
        if config.trust_server_cert {
            tds.trust_cert();
        }
        tds.encryption(EncryptionLevel::Required);
    } else {
        tds.encryption(EncryptionLevel::NotSupported);
    }

    Ok(tds)
}

/// Build the catalog query resolving base tables and their identity
/// columns. The schema is bound as `@P1`; the filter list is rendered
/// inline as escaped string literals.
fn build_catalog_query(filter: &TableFilter) -> String {
    let filter_clause = if filter.is_empty() {
        String::new()
    } else {
        let names = filter
            .names()
            .map(quote_text)
            .collect::<Vec<_>>()
            .join(", ");
        let op = if filter.is_exclusive() { "NOT IN" } else { "IN" };
        format!("  AND t.TABLE_NAME {} ({})\n", op, names)
    };

    format!(
        r#"SELECT
    t.TABLE_NAME,
    (
        SELECT TOP 1 c.COLUMN_NAME
        FROM INFORMATION_SCHEMA.COLUMNS c
        WHERE c.TABLE_SCHEMA = t.TABLE_SCHEMA
          AND c.TABLE_NAME = t.TABLE_NAME
          AND COLUMNPROPERTY(OBJECT_ID(c.TABLE_SCHEMA + '.' + c.TABLE_NAME), c.COLUMN_NAME, 'IsIdentity') = 1
        ORDER BY c.ORDINAL_POSITION
    ) AS IDENTITY_COLUMN
FROM INFORMATION_SCHEMA.TABLES t
WHERE t.TABLE_TYPE = 'BASE TABLE'
  AND t.TABLE_SCHEMA = @P1
{}ORDER BY t.TABLE_NAME
"#,
        filter_clause
    )
}

/// Build the row query for one table. The limit is enforced server-side
/// with TOP, never by client-side truncation.
fn build_row_query(table: &str, limit: Option<u32>) -> String {
    match limit {
        Some(n) => format!("SELECT TOP {} * FROM {}", n, quote_ident(table)),
        None => format!("SELECT * FROM {}", quote_ident(table)),
    }
}

/// Convert a single cell at the driver boundary.
///
/// This is the only place that inspects driver types; everything past
/// here pattern-matches the closed `RowValue` union. Numerics are
/// rendered with invariant formatting so no locale-dependent separators
/// can leak into literals.
fn convert_cell(
    data: ColumnData<'static>,
) -> std::result::Result<RowValue, tiberius::error::Error> {
    let value = match data {
        ColumnData::Bit(v) => v.map(RowValue::Bool),
        ColumnData::U8(v) => v.map(|v| RowValue::Other(v.to_string())),
        ColumnData::I16(v) => v.map(|v| RowValue::Other(v.to_string())),
        ColumnData::I32(v) => v.map(|v| RowValue::Other(v.to_string())),
        ColumnData::I64(v) => v.map(|v| RowValue::Other(v.to_string())),
        ColumnData::F32(v) => v.map(|v| RowValue::Other(v.to_string())),
        ColumnData::F64(v) => v.map(|v| RowValue::Other(v.to_string())),
        ColumnData::Numeric(_) => {
            Decimal::from_sql(&data)?.map(|d| RowValue::Other(d.to_string()))
        }
        ColumnData::String(v) => v.map(|s| RowValue::Text(s.into_owned())),
        ColumnData::Guid(v) => v.map(RowValue::Uuid),
        ColumnData::Binary(v) => v.map(|b| RowValue::Binary(b.into_owned())),
        ColumnData::DateTime(_) | ColumnData::SmallDateTime(_) | ColumnData::DateTime2(_) => {
            NaiveDateTime::from_sql(&data)?.map(RowValue::Timestamp)
        }
        ColumnData::Date(_) => NaiveDate::from_sql(&data)?
            .map(|d| RowValue::Timestamp(d.and_time(NaiveTime::MIN))),
        ColumnData::Time(_) => NaiveTime::from_sql(&data)?
            .map(|t| RowValue::Text(t.format("%H:%M:%S%.7f").to_string())),
        ColumnData::DateTimeOffset(_) => DateTime::<FixedOffset>::from_sql(&data)?
            .map(|dt| RowValue::Text(dt.format("%Y-%m-%d %H:%M:%S%.3f %:z").to_string())),
        ColumnData::Xml(v) => v.map(|x| RowValue::Text(x.into_owned().into_string())),
    };

    Ok(value.unwrap_or(RowValue::Null))
}

#[async_trait]
impl Source for MssqlSource {
    async fn list_tables(&mut self, filter: &TableFilter) -> Result<Vec<TableDescriptor>> {
        let sql = build_catalog_query(filter);

        let mut query = Query::new(sql);
        query.bind(self.schema.as_str());

        let stream = query
            .query(&mut self.client)
            .await
            .map_err(DumpError::Catalog)?;
        let rows = stream
            .into_first_result()
            .await
            .map_err(DumpError::Catalog)?;

        let mut tables = Vec::with_capacity(rows.len());
        for row in rows {
            let name = row.get::<&str, _>(0).unwrap_or_default().to_string();
            let identity_column = row.get::<&str, _>(1).map(str::to_string);
            tables.push(TableDescriptor {
                name,
                identity_column,
            });
        }

        info!("Selected {} tables from schema '{}'", tables.len(), self.schema);
        Ok(tables)
    }

    async fn read_rows(
        &mut self,
        table: &TableDescriptor,
        limit: Option<u32>,
    ) -> Result<RowSet> {
        let sql = build_row_query(&table.name, limit);
        debug!("Reading rows: {}", sql);

        let mut stream = self
            .client
            .simple_query(&sql)
            .await
            .map_err(|e| DumpError::row_read(table.name.as_str(), e))?;

        let columns: Vec<String> = stream
            .columns()
            .await
            .map_err(|e| DumpError::row_read(table.name.as_str(), e))?
            .map(|cols| cols.iter().map(|c| c.name().to_string()).collect())
            .unwrap_or_default();

        let raw_rows = stream
            .into_first_result()
            .await
            .map_err(|e| DumpError::row_read(table.name.as_str(), e))?;

        let mut rows = Vec::with_capacity(raw_rows.len());
        for row in raw_rows {
            let mut values = Vec::with_capacity(columns.len());
            for data in row.into_iter() {
                let value =
                    convert_cell(data).map_err(|e| DumpError::row_read(table.name.as_str(), e))?;
                values.push(value);
            }
            rows.push(values);
        }

        debug!("Read {} rows from {}", rows.len(), table.name);
        Ok(RowSet { columns, rows })
    }
}
