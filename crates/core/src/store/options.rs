//! Site option operations.
//!
//! The store holds exactly two options the informer core consumes: the
//! remote API key and the default informer ID. Both read as empty strings
//! when unset.

use super::connection::StoreDb;
use crate::Error;
use tokio_rusqlite::params;

/// Option name for the remote API key.
pub const OPT_API_KEY: &str = "meteoprog_api_key";

/// Option name for the default informer ID.
pub const OPT_DEFAULT_ID: &str = "meteoprog_default_informer_id";

impl StoreDb {
    /// Get a raw option value by name.
    ///
    /// Returns None if the option has never been written.
    pub async fn get_option(&self, name: &str) -> Result<Option<String>, Error> {
        let name = name.to_string();
        self.conn
            .call(move |conn| -> Result<Option<String>, Error> {
                let mut stmt = conn.prepare("SELECT value FROM options WHERE name = ?1")?;
                match stmt.query_row(params![name], |row| row.get(0)) {
                    Ok(value) => Ok(Some(value)),
                    Err(tokio_rusqlite::rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Insert or update an option.
    pub async fn set_option(&self, name: &str, value: &str) -> Result<(), Error> {
        let name = name.to_string();
        let value = value.to_string();
        let updated_at = chrono::Utc::now().to_rfc3339();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO options (name, value, updated_at) VALUES (?1, ?2, ?3)
                    ON CONFLICT(name) DO UPDATE SET
                        value = excluded.value,
                        updated_at = excluded.updated_at",
                    params![name, value, updated_at],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Delete an option. Returns true if a row was removed.
    pub async fn delete_option(&self, name: &str) -> Result<bool, Error> {
        let name = name.to_string();
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let count = conn.execute("DELETE FROM options WHERE name = ?1", params![name])?;
                Ok(count > 0)
            })
            .await
            .map_err(Error::from)
    }

    /// Stored API key, or an empty string.
    pub async fn api_key(&self) -> Result<String, Error> {
        Ok(self.get_option(OPT_API_KEY).await?.unwrap_or_default())
    }

    pub async fn set_api_key(&self, key: &str) -> Result<(), Error> {
        self.set_option(OPT_API_KEY, key).await
    }

    /// Stored default informer ID, or an empty string.
    pub async fn default_informer_id(&self) -> Result<String, Error> {
        Ok(self.get_option(OPT_DEFAULT_ID).await?.unwrap_or_default())
    }

    pub async fn set_default_informer_id(&self, id: &str) -> Result<(), Error> {
        self.set_option(OPT_DEFAULT_ID, id).await
    }

    /// Remove every plugin option and every cached snapshot.
    ///
    /// Returns the number of rows deleted across both tables.
    pub async fn delete_all_data(&self) -> Result<u64, Error> {
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let options = conn.execute(
                    "DELETE FROM options WHERE name IN (?1, ?2)",
                    params![OPT_API_KEY, OPT_DEFAULT_ID],
                )?;
                let snapshots = conn.execute("DELETE FROM directory_cache", [])?;
                Ok((options + snapshots) as u64)
            })
            .await
            .map_err(Error::from)
    }
}
