//! Table operations over a generic relational connection.

use crate::catalog;
use crate::connection::{CatalogConnection, ConnectionProvider, DriverError};
use crate::error::ErrorMapper;
use crate::identifier::IdentifierCase;
use crate::projector;
use crate::statements::{DefaultTableStatements, TableStatements};
use async_trait::async_trait;
use std::sync::Arc;
use tablecat_core::{
    ConnectorError, ConnectorRequestContext, Pageable, QualifiedName, Sort, TableInfo,
    TypeConverter, paginate, sort,
};

/// Table-scoped operations exposed to the catalog service.
#[async_trait]
pub trait TableService: Send + Sync {
    /// Describe one table.
    async fn get(
        &self,
        context: &ConnectorRequestContext,
        name: &QualifiedName,
    ) -> Result<TableInfo, ConnectorError>;

    /// Describe every table of the database `name`, after prefix filtering,
    /// sorting and pagination of the names. Fails as a whole if any single
    /// table cannot be described.
    async fn list(
        &self,
        context: &ConnectorRequestContext,
        name: &QualifiedName,
        prefix: Option<&QualifiedName>,
        sort: Option<&Sort>,
        pageable: Option<&Pageable>,
    ) -> Result<Vec<TableInfo>, ConnectorError>;

    /// Names of the tables and views of the database `name`.
    async fn list_names(
        &self,
        context: &ConnectorRequestContext,
        name: &QualifiedName,
        prefix: Option<&QualifiedName>,
        sort: Option<&Sort>,
        pageable: Option<&Pageable>,
    ) -> Result<Vec<QualifiedName>, ConnectorError>;

    /// Rename a table within its database.
    async fn rename(
        &self,
        context: &ConnectorRequestContext,
        old_name: &QualifiedName,
        new_name: &QualifiedName,
    ) -> Result<(), ConnectorError>;

    /// Drop a table.
    async fn delete(
        &self,
        context: &ConnectorRequestContext,
        name: &QualifiedName,
    ) -> Result<(), ConnectorError>;
}

/// [`TableService`] for any backend reachable through a [`ConnectionProvider`].
///
/// Every operation acquires one connection, does all its work on it and
/// releases it before returning, whether or not the work succeeded. Nothing
/// is cached between calls.
pub struct RelationalTableService<S = DefaultTableStatements> {
    provider: Arc<dyn ConnectionProvider>,
    type_converter: Arc<dyn TypeConverter>,
    error_mapper: Arc<dyn ErrorMapper>,
    statements: S,
}

impl RelationalTableService<DefaultTableStatements> {
    pub fn new(
        provider: Arc<dyn ConnectionProvider>,
        type_converter: Arc<dyn TypeConverter>,
        error_mapper: Arc<dyn ErrorMapper>,
    ) -> Self {
        Self {
            provider,
            type_converter,
            error_mapper,
            statements: DefaultTableStatements,
        }
    }
}

impl<S: TableStatements> RelationalTableService<S> {
    /// Replace the DDL generator.
    pub fn with_statements<T: TableStatements>(self, statements: T) -> RelationalTableService<T> {
        RelationalTableService {
            provider: self.provider,
            type_converter: self.type_converter,
            error_mapper: self.error_mapper,
            statements,
        }
    }

    fn translate(&self, error: DriverError, name: &QualifiedName) -> ConnectorError {
        self.error_mapper.to_connector_error(error, name)
    }

    async fn acquire(
        &self,
        name: &QualifiedName,
    ) -> Result<Box<dyn CatalogConnection>, ConnectorError> {
        self.provider
            .connect()
            .await
            .map_err(|e| self.translate(e, name))
    }

    /// Release `connection` and translate the outcome of the work done on it.
    ///
    /// A release failure is reported only when the work itself succeeded.
    async fn release<T>(
        &self,
        connection: Box<dyn CatalogConnection>,
        outcome: Result<T, DriverError>,
        name: &QualifiedName,
    ) -> Result<T, ConnectorError> {
        let released = connection.close().await;
        match (outcome, released) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) | (Err(e), Ok(())) => Err(self.translate(e, name)),
            (Err(e), Err(close_error)) => {
                tracing::warn!(
                    qualified_name = %name,
                    error = %close_error,
                    "Failed to release connection after failed operation"
                );
                Err(self.translate(e, name))
            }
        }
    }

    /// Scope `connection` to the database of `name` under its case policy.
    async fn enter_schema(
        connection: &mut dyn CatalogConnection,
        name: &QualifiedName,
    ) -> Result<IdentifierCase, DriverError> {
        let case = IdentifierCase::detect(connection).await?;
        connection
            .set_schema(&case.apply(name.database_name()))
            .await?;
        Ok(case)
    }

    async fn read_table(
        &self,
        connection: &mut dyn CatalogConnection,
        name: &QualifiedName,
    ) -> Result<TableInfo, DriverError> {
        let case = Self::enter_schema(connection, name).await?;
        let rows = catalog::list_columns(
            connection,
            &case.apply(name.database_name()),
            &case.apply(name.table_name()),
        )
        .await?;

        let fields = rows
            .into_iter()
            .map(|row| projector::to_field_info(row, self.type_converter.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TableInfo::new(name.clone(), fields))
    }

    async fn read_names(
        &self,
        connection: &mut dyn CatalogConnection,
        name: &QualifiedName,
        prefix: Option<&QualifiedName>,
    ) -> Result<Vec<QualifiedName>, DriverError> {
        let case = Self::enter_schema(connection, name).await?;
        let prefix = prefix.map(|p| case.apply(p.table_name()));
        let rows = catalog::list_tables(
            connection,
            &case.apply(name.database_name()),
            prefix.as_deref(),
        )
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| projector::to_table_name(row, name))
            .collect())
    }

    async fn drop_table(
        &self,
        connection: &mut dyn CatalogConnection,
        name: &QualifiedName,
    ) -> Result<(), DriverError> {
        let case = Self::enter_schema(connection, name).await?;
        let sql = self
            .statements
            .drop_table_sql(name, &case.apply(name.table_name()));
        connection.execute_update(&sql).await?;
        Ok(())
    }

    async fn rename_table(
        &self,
        connection: &mut dyn CatalogConnection,
        old_name: &QualifiedName,
        new_name: &QualifiedName,
    ) -> Result<(), DriverError> {
        let case = Self::enter_schema(connection, old_name).await?;
        let sql = self.statements.rename_table_sql(
            old_name,
            &case.apply(old_name.table_name()),
            &case.apply(new_name.table_name()),
        );
        connection.execute_update(&sql).await?;
        Ok(())
    }
}

#[async_trait]
impl<S: TableStatements> TableService for RelationalTableService<S> {
    async fn get(
        &self,
        context: &ConnectorRequestContext,
        name: &QualifiedName,
    ) -> Result<TableInfo, ConnectorError> {
        tracing::debug!(qualified_name = %name, request_id = %context.request_id, "Beginning to get table metadata");

        let mut connection = self.acquire(name).await?;
        let outcome = self.read_table(connection.as_mut(), name).await;
        let table = self.release(connection, outcome, name).await?;

        tracing::debug!(
            qualified_name = %name,
            request_id = %context.request_id,
            fields = table.fields.len(),
            "Finished getting table metadata"
        );
        Ok(table)
    }

    async fn list(
        &self,
        context: &ConnectorRequestContext,
        name: &QualifiedName,
        prefix: Option<&QualifiedName>,
        sort: Option<&Sort>,
        pageable: Option<&Pageable>,
    ) -> Result<Vec<TableInfo>, ConnectorError> {
        tracing::debug!(qualified_name = %name, request_id = %context.request_id, "Beginning to list table metadata");

        let names = self
            .list_names(context, name, prefix, sort, pageable)
            .await?;
        let mut tables = Vec::with_capacity(names.len());
        for table_name in &names {
            tables.push(self.get(context, table_name).await?);
        }

        tracing::debug!(
            qualified_name = %name,
            request_id = %context.request_id,
            tables = tables.len(),
            "Finished listing table metadata"
        );
        Ok(tables)
    }

    async fn list_names(
        &self,
        context: &ConnectorRequestContext,
        name: &QualifiedName,
        prefix: Option<&QualifiedName>,
        sort_by: Option<&Sort>,
        pageable: Option<&Pageable>,
    ) -> Result<Vec<QualifiedName>, ConnectorError> {
        tracing::debug!(qualified_name = %name, request_id = %context.request_id, "Beginning to list table names");

        let mut connection = self.acquire(name).await?;
        let outcome = self.read_names(connection.as_mut(), name, prefix).await;
        let mut names = self.release(connection, outcome, name).await?;

        if let Some(sort_by) = sort_by {
            sort(&mut names, sort_by, |a, b| a.table_name().cmp(b.table_name()));
        }
        let names = paginate(names, pageable);

        tracing::debug!(
            qualified_name = %name,
            request_id = %context.request_id,
            count = names.len(),
            "Finished listing table names"
        );
        Ok(names)
    }

    async fn rename(
        &self,
        context: &ConnectorRequestContext,
        old_name: &QualifiedName,
        new_name: &QualifiedName,
    ) -> Result<(), ConnectorError> {
        tracing::debug!(
            old = %old_name,
            new = %new_name,
            request_id = %context.request_id,
            "Attempting to rename table"
        );

        if old_name.database_name() != new_name.database_name() {
            return Err(ConnectorError::InvalidArgument(format!(
                "Database names must match and they are {} and {}",
                old_name.database_name(),
                new_name.database_name()
            )));
        }

        let mut connection = self.acquire(old_name).await?;
        let outcome = self
            .rename_table(connection.as_mut(), old_name, new_name)
            .await;
        self.release(connection, outcome, old_name).await?;

        tracing::debug!(
            old = %old_name,
            new = %new_name,
            request_id = %context.request_id,
            "Renamed table"
        );
        Ok(())
    }

    async fn delete(
        &self,
        context: &ConnectorRequestContext,
        name: &QualifiedName,
    ) -> Result<(), ConnectorError> {
        tracing::debug!(qualified_name = %name, request_id = %context.request_id, "Attempting to delete table");

        let mut connection = self.acquire(name).await?;
        let outcome = self.drop_table(connection.as_mut(), name).await;
        self.release(connection, outcome, name).await?;

        tracing::debug!(qualified_name = %name, request_id = %context.request_id, "Deleted table");
        Ok(())
    }
}
