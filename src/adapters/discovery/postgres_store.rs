//! PostgreSQL implementation of DiscoveryProfileStore.
//!
//! Each profile is a JSONB document in `discovery_profiles`, keyed by user id,
//! with an integer `version` used for compare-and-swap updates.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::discovery::{DiscoveryProfile, ProfileVersion, VersionedProfile};
use crate::domain::foundation::UserId;
use crate::ports::{DiscoveryProfileStore, ProfileStoreError};

/// PostgreSQL implementation of the DiscoveryProfileStore port.
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the bundled migrations.
    pub async fn migrate(&self) -> Result<(), ProfileStoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ProfileStoreError::Database(format!("Migration failed: {}", e)))
    }
}

/// Database row representation of a stored profile.
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    document: Json<DiscoveryProfile>,
    version: i32,
}

impl TryFrom<ProfileRow> for VersionedProfile {
    type Error = ProfileStoreError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let version = u32::try_from(row.version)
            .ok()
            .and_then(|v| ProfileVersion::from_u32(v).ok())
            .ok_or_else(|| {
                ProfileStoreError::Database(format!("Invalid stored version: {}", row.version))
            })?;

        Ok(VersionedProfile {
            version,
            profile: row.document.0,
        })
    }
}

fn version_to_db(version: ProfileVersion) -> Result<i32, ProfileStoreError> {
    i32::try_from(version.as_u32())
        .map_err(|_| ProfileStoreError::Database(format!("Version {} out of range", version)))
}

fn db_error(context: &str, e: sqlx::Error) -> ProfileStoreError {
    ProfileStoreError::Database(format!("{}: {}", context, e))
}

#[async_trait]
impl DiscoveryProfileStore for PgProfileStore {
    async fn load(&self, user_id: &UserId) -> Result<Option<VersionedProfile>, ProfileStoreError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r#"
            SELECT document, version
            FROM discovery_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load profile", e))?;

        row.map(VersionedProfile::try_from).transpose()
    }

    async fn save(
        &self,
        user_id: &UserId,
        profile: &DiscoveryProfile,
        expected: Option<ProfileVersion>,
    ) -> Result<ProfileVersion, ProfileStoreError> {
        let result = match expected {
            None => sqlx::query(
                r#"
                INSERT INTO discovery_profiles (user_id, document, stage, version, updated_at)
                VALUES ($1, $2, $3, 1, $4)
                ON CONFLICT (user_id) DO NOTHING
                "#,
            )
            .bind(user_id.as_str())
            .bind(Json(profile))
            .bind(profile.stage.as_str())
            .bind(profile.last_updated.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to create profile", e))?,
            Some(version) => sqlx::query(
                r#"
                UPDATE discovery_profiles SET
                    document = $2,
                    stage = $3,
                    updated_at = $4,
                    version = version + 1
                WHERE user_id = $1 AND version = $5
                "#,
            )
            .bind(user_id.as_str())
            .bind(Json(profile))
            .bind(profile.stage.as_str())
            .bind(profile.last_updated.as_datetime())
            .bind(version_to_db(version)?)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update profile", e))?,
        };

        if result.rows_affected() == 0 {
            return Err(ProfileStoreError::conflict(user_id, expected));
        }

        Ok(expected.map_or_else(ProfileVersion::initial, |v| v.increment()))
    }
}
