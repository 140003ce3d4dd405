use anyhow::Context;
use async_trait::async_trait;
use avisgate_core::Principal;
use sqlx::{FromRow, PgPool};

use super::PrincipalStore;

#[derive(Debug, FromRow)]
struct PrincipalRow {
    email: String,
    full_name: Option<String>,
    password: String,
    authorities: Vec<String>,
}

impl From<PrincipalRow> for Principal {
    fn from(row: PrincipalRow) -> Self {
        Principal {
            identifier: row.email,
            full_name: row.full_name,
            credential_hash: row.password,
            authorities: row.authorities.into_iter().collect(),
        }
    }
}

/// Principals backed by the `users` table (see `migrations/`).
#[derive(Debug, Clone)]
pub struct PgPrincipalStore {
    pool: PgPool,
}

impl PgPrincipalStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrincipalStore for PgPrincipalStore {
    async fn find_by_identifier(&self, identifier: &str) -> anyhow::Result<Option<Principal>> {
        let row = sqlx::query_as::<_, PrincipalRow>(
            r#"
            SELECT email, full_name, password, authorities
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to look up principal")?;

        Ok(row.map(Principal::from))
    }

    async fn insert(&self, principal: Principal) -> anyhow::Result<bool> {
        let authorities: Vec<String> = principal.authorities.into_iter().collect();

        let result = sqlx::query(
            r#"
            INSERT INTO users (email, full_name, password, authorities)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(&principal.identifier)
        .bind(&principal.full_name)
        .bind(&principal.credential_hash)
        .bind(&authorities)
        .execute(&self.pool)
        .await
        .context("Failed to insert principal")?;

        Ok(result.rows_affected() == 1)
    }
}
