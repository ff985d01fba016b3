//! Change feed service
//!
//! Every mutation is recorded twice: a durable row in `change_log` with a
//! monotonic sequence number (serving delta polling, so a dashboard that
//! lost its connection can catch up), and a broadcast message for in-process
//! subscribers. The aggregation core never subscribes; it is simply re-run
//! against a fresh snapshot when the caller sees a change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Which collection a change touched
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Product,
    Order,
    Expense,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Product => "product",
            EntityKind::Order => "order",
            EntityKind::Expense => "expense",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "product" => Some(EntityKind::Product),
            "order" => Some(EntityKind::Order),
            "expense" => Some(EntityKind::Expense),
            _ => None,
        }
    }
}

/// What happened to the entity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOp {
    Inserted,
    Updated,
    Deleted,
}

impl ChangeOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeOp::Inserted => "inserted",
            ChangeOp::Updated => "updated",
            ChangeOp::Deleted => "deleted",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "inserted" => Some(ChangeOp::Inserted),
            "updated" => Some(ChangeOp::Updated),
            "deleted" => Some(ChangeOp::Deleted),
            _ => None,
        }
    }
}

/// An immutable change notification
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChangeEvent {
    pub seq: i64,
    pub entity: EntityKind,
    pub op: ChangeOp,
    pub entity_id: Uuid,
    pub changed_at: DateTime<Utc>,
}

/// Row for change_log queries
#[derive(Debug, FromRow)]
struct ChangeRow {
    seq: i64,
    entity: String,
    op: String,
    entity_id: Uuid,
    changed_at: DateTime<Utc>,
}

impl ChangeRow {
    fn into_event(self) -> AppResult<ChangeEvent> {
        let entity = EntityKind::parse(&self.entity)
            .ok_or_else(|| AppError::Internal(format!("unknown entity kind: {}", self.entity)))?;
        let op = ChangeOp::parse(&self.op)
            .ok_or_else(|| AppError::Internal(format!("unknown change op: {}", self.op)))?;
        Ok(ChangeEvent {
            seq: self.seq,
            entity,
            op,
            entity_id: self.entity_id,
            changed_at: self.changed_at,
        })
    }
}

/// Change feed shared through the application state
#[derive(Clone)]
pub struct ChangeFeed {
    db: PgPool,
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    pub fn new(db: PgPool) -> Self {
        let (tx, _) = broadcast::channel(256);
        Self { db, tx }
    }

    /// Subscribe to live change events
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    /// Record a mutation and notify subscribers
    pub async fn record(
        &self,
        entity: EntityKind,
        op: ChangeOp,
        entity_id: Uuid,
    ) -> AppResult<ChangeEvent> {
        let row = sqlx::query_as::<_, ChangeRow>(
            r#"
            INSERT INTO change_log (entity, op, entity_id)
            VALUES ($1, $2, $3)
            RETURNING seq, entity, op, entity_id, changed_at
            "#,
        )
        .bind(entity.as_str())
        .bind(op.as_str())
        .bind(entity_id)
        .fetch_one(&self.db)
        .await?;

        let event = row.into_event()?;
        // Nobody listening is fine
        let _ = self.tx.send(event.clone());
        Ok(event)
    }

    /// Get changes after a sequence number, oldest first
    pub async fn changes_since(&self, since_seq: i64, limit: i64) -> AppResult<Vec<ChangeEvent>> {
        let rows = sqlx::query_as::<_, ChangeRow>(
            r#"
            SELECT seq, entity, op, entity_id, changed_at
            FROM change_log
            WHERE seq > $1
            ORDER BY seq ASC
            LIMIT $2
            "#,
        )
        .bind(since_seq)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(ChangeRow::into_event).collect()
    }
}
