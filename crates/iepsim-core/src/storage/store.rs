use crate::model::SimulationLogRequest;
use anyhow::Context;
use rusqlite::{params, Connection};
use serde_json::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct Store {
    pub conn: Arc<Mutex<Connection>>,
}

impl Store {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let conn = Connection::open(path).context("failed to open sqlite db")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory sqlite db")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn init_schema(&self) -> anyhow::Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(crate::storage::schema::DDL)?;
        Ok(())
    }

    /// Append one telemetry row. Rows are never updated or merged afterwards;
    /// repeated calls with the same scenario id simply accumulate.
    pub fn insert_simulation(
        &self,
        req: &SimulationLogRequest,
        user_agent: Option<&str>,
    ) -> anyhow::Result<i64> {
        let conn = self.conn.lock().unwrap();
        let timestamp = chrono::Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO simulation_logs(timestamp, scenario_id, parent_choices, outcome_scores,
                                         start_time, end_time, elapsed_seconds, user_agent, meta)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                timestamp,
                req.scenario_id,
                serde_json::to_string(&req.parent_choices)?,
                serde_json::to_string(&req.outcome_scores)?,
                req.start_time.as_ref().map(value_to_text),
                req.end_time.as_ref().map(value_to_text),
                req.elapsed_seconds,
                user_agent,
                meta_to_text(&req.meta)?,
            ],
        )
        .context("insert simulation log")?;
        Ok(conn.last_insert_rowid())
    }

    /// Append one caller-suggested scenario, timestamped at write time.
    pub fn insert_suggestion(&self, suggestion: &Value) -> anyhow::Result<i64> {
        let conn = self.conn.lock().unwrap();
        let timestamp = chrono::Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO scenario_suggestions(timestamp, suggestion) VALUES (?1, ?2)",
            params![timestamp, serde_json::to_string(suggestion)?],
        )
        .context("insert scenario suggestion")?;
        Ok(conn.last_insert_rowid())
    }

    pub fn count_rows(&self, table: &str) -> anyhow::Result<i64> {
        let conn = self.conn.lock().unwrap();
        // Simple allowlist, the table name is interpolated into SQL.
        if !["simulation_logs", "scenario_suggestions"].contains(&table) {
            anyhow::bail!("Invalid table name for count_rows: {}", table);
        }
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let n: i64 = conn.query_row(&sql, [], |r| r.get(0))?;
        Ok(n)
    }
}

/// Start/end times arrive as arbitrary JSON and are stored as free text,
/// never parsed as dates. A JSON string keeps its content; anything else is
/// stored in serialized form.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Absent metadata is stored as an empty serialized mapping, never as a
/// missing column.
fn meta_to_text(meta: &Value) -> anyhow::Result<String> {
    if meta.is_null() {
        return Ok("{}".to_string());
    }
    Ok(serde_json::to_string(meta)?)
}
