/*
This file is part of the TA Boundary Download Tool
Copyright (C) 2022 Novel-T

The TA Boundary Download Tool is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/
use anyhow::{Context, Result};
use log::{debug, info};
use postgis::ewkb;
use postgres::{Client, NoTls};

use crate::config::{Config, DatabaseConfig};

/// Owns the output database connection and all SQL around the boundary copy.
pub struct TaDatabase {
    client: Client,
    schema: String,
    table: String,
    geom_column: String,
}

pub fn connection_string(db: &DatabaseConfig) -> String {
    let mut conn = format!("dbname={}", db.name);

    if let Some(host) = &db.host {
        conn.push_str(&format!(" host={}", host));
    }
    if let Some(port) = db.port {
        conn.push_str(&format!(" port={}", port));
    }
    if let Some(user) = &db.user {
        conn.push_str(&format!(" user={}", user));
    }
    if let Some(password) = &db.password {
        conn.push_str(&format!(" password={}", password));
    }

    conn
}

impl TaDatabase {
    pub fn connect(config: &Config) -> Result<Self> {
        let mut client = Client::connect(&connection_string(&config.database), NoTls)
            .context("Can't open the output database")?;

        if let Some(rolename) = &config.database.rolename {
            client.batch_execute(&format!("SET ROLE {}", rolename))?;
        }

        Ok(Self {
            client,
            schema: config.database.schema.clone(),
            table: config.layer.name.clone(),
            geom_column: config.layer.geom_column.clone(),
        })
    }

    fn full_table_name(&self) -> String {
        format!("{}.{}", self.schema, self.table)
    }

    pub fn table_exists(&mut self) -> Result<bool> {
        let row = self.client.query_opt(
            "SELECT 1
             FROM pg_class
             JOIN pg_namespace ON pg_class.relnamespace = pg_namespace.oid
             WHERE nspname = $1 AND relname = $2 AND relkind = 'r'",
            &[&self.schema, &self.table],
        )?;

        Ok(row.is_some())
    }

    /// The dataset year last loaded, stamped as the table comment.
    ///
    /// A missing or non numeric comment reads as no version, which forces a
    /// reload.
    pub fn stored_version(&mut self) -> Result<Option<i32>> {
        let row = self.client.query_opt(
            "SELECT description
             FROM pg_description
             JOIN pg_class ON pg_description.objoid = pg_class.oid
             JOIN pg_namespace ON pg_class.relnamespace = pg_namespace.oid
             WHERE nspname = $1 AND relname = $2 AND objsubid = 0",
            &[&self.schema, &self.table],
        )?;

        let version = row
            .map(|r| r.get::<_, String>("description"))
            .and_then(|description| description.trim().parse::<i32>().ok());

        Ok(version)
    }

    pub fn create_table(&mut self, srid: i32) -> Result<()> {
        debug!("Creating {}", self.full_table_name());

        self.client
            .batch_execute(&format!(
                "CREATE TABLE {table} (
                    ogc_fid serial PRIMARY KEY,
                    {geom} geometry(MultiPolygon, {srid}),
                    name varchar(100)
                );
                GRANT SELECT ON TABLE {table} TO public",
                table = self.full_table_name(),
                geom = self.geom_column,
                srid = srid,
            ))
            .context("Can not create TA output table")?;

        Ok(())
    }

    pub fn truncate(&mut self) -> Result<()> {
        self.client
            .batch_execute(&format!("TRUNCATE {}", self.full_table_name()))?;

        Ok(())
    }

    /// Writes all rows in a single transaction; readers never observe a half
    /// loaded table.
    pub fn copy_features(&mut self, rows: &[(String, ewkb::MultiPolygon)]) -> Result<usize> {
        let insert_sql = format!(
            "INSERT INTO {} (name, {}) VALUES ($1, $2)",
            self.full_table_name(),
            self.geom_column
        );

        let mut transaction = self.client.transaction()?;

        let statement = transaction.prepare(&insert_sql)?;

        for (name, geom) in rows {
            transaction.execute(&statement, &[name, geom])?;
        }

        transaction.commit()?;

        Ok(rows.len())
    }

    pub fn analyze(&mut self) -> Result<()> {
        self.client
            .batch_execute(&format!("ANALYZE {}", self.full_table_name()))?;

        Ok(())
    }

    pub fn set_version(&mut self, year: i32) -> Result<()> {
        self.client.batch_execute(&format!(
            "COMMENT ON TABLE {} IS '{}'",
            self.full_table_name(),
            year
        ))?;

        Ok(())
    }

    /// Builds the derived grid index through the in-database helper function.
    pub fn create_grid(&mut self, grid_res: f64) -> Result<()> {
        let sql = format!(
            "SELECT create_table_polygon_grid('{}', '{}', '{}', {}, {}) as result",
            self.schema, self.table, self.geom_column, grid_res, grid_res
        );
        debug!("Building grid with SQL {}", sql);

        let row = self
            .client
            .query_one(&sql, &[])
            .context("Failed to create grid layer")?;

        let result: String = row.get("result");
        info!("Created grid layer: {}", result);

        Ok(())
    }
}
