pub const DDL: &str = r#"
CREATE TABLE IF NOT EXISTS simulation_logs (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  timestamp TEXT NOT NULL,
  scenario_id TEXT,
  parent_choices TEXT NOT NULL,
  outcome_scores TEXT NOT NULL,
  start_time TEXT,
  end_time TEXT,
  elapsed_seconds INTEGER,
  user_agent TEXT,
  meta TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS scenario_suggestions (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  timestamp TEXT NOT NULL,
  suggestion TEXT NOT NULL
);
"#;
