use std::env;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind: String,
    pub db_path: String,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
            db_path: "simulation_logs.db".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(v) = env::var("IEPSIM_BIND") {
            if !v.is_empty() {
                cfg.bind = v;
            }
        }
        if let Ok(v) = env::var("IEPSIM_DB") {
            if !v.is_empty() {
                cfg.db_path = v;
            }
        }
        if let Ok(v) = env::var("IEPSIM_LOG") {
            cfg.log_level = v;
        }
        cfg
    }
}
