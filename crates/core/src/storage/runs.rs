use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Upper bound for `list_runs`, whatever the caller asks for.
pub const MAX_LIST_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunKind {
    Analysis,
}

impl RunKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RunKind::Analysis => "analysis",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredRun {
    pub id: uuid::Uuid,
    pub subject_id: String,
    pub kind: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub input: serde_json::Value,
    pub output: serde_json::Value,
}

/// Inserts a new run. Earlier runs for the same subject are kept; the newest
/// one wins on read.
pub async fn persist_run(
    pool: &sqlx::PgPool,
    subject_id: &str,
    kind: RunKind,
    input: &impl Serialize,
    output: &impl Serialize,
) -> anyhow::Result<uuid::Uuid> {
    let input = serde_json::to_value(input).context("serialize run input failed")?;
    let output = serde_json::to_value(output).context("serialize run output failed")?;

    let id: uuid::Uuid = sqlx::query_scalar(
        "INSERT INTO analysis_runs (id, subject_id, kind, created_at, input, output) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING id",
    )
    .bind(uuid::Uuid::new_v4())
    .bind(subject_id)
    .bind(kind.as_str())
    .bind(chrono::Utc::now())
    .bind(input)
    .bind(output)
    .fetch_one(pool)
    .await
    .context("insert analysis_runs failed")?;

    tracing::info!(%id, subject_id, kind = kind.as_str(), "persisted run");
    Ok(id)
}

pub async fn fetch_latest_run(
    pool: &sqlx::PgPool,
    subject_id: &str,
    kind: RunKind,
) -> anyhow::Result<Option<StoredRun>> {
    sqlx::query_as::<_, StoredRun>(
        "SELECT id, subject_id, kind, created_at, input, output \
         FROM analysis_runs \
         WHERE subject_id = $1 AND kind = $2 \
         ORDER BY created_at DESC \
         LIMIT 1",
    )
    .bind(subject_id)
    .bind(kind.as_str())
    .fetch_optional(pool)
    .await
    .context("select latest analysis_runs failed")
}

/// Newest first, across all kinds.
pub async fn list_runs(
    pool: &sqlx::PgPool,
    subject_id: &str,
    limit: i64,
) -> anyhow::Result<Vec<StoredRun>> {
    sqlx::query_as::<_, StoredRun>(
        "SELECT id, subject_id, kind, created_at, input, output \
         FROM analysis_runs \
         WHERE subject_id = $1 \
         ORDER BY created_at DESC \
         LIMIT $2",
    )
    .bind(subject_id)
    .bind(clamp_limit(limit))
    .fetch_all(pool)
    .await
    .context("select analysis_runs failed")
}

fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(1, MAX_LIST_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_bounded() {
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(-5), 1);
        assert_eq!(clamp_limit(20), 20);
        assert_eq!(clamp_limit(10_000), MAX_LIST_LIMIT);
    }

    #[test]
    fn kind_wire_name_matches_storage_name() {
        let wire = serde_json::to_value(RunKind::Analysis).unwrap();
        assert_eq!(wire, serde_json::Value::String("analysis".to_string()));
        assert_eq!(RunKind::Analysis.as_str(), "analysis");
    }
}
