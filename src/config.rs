use std::env;

pub const LOG_ENV: &str = "RELATORIO_LOG";
pub const LOG_DEFAULT: &str = "info";

pub const APPLY_ROTATION_ENV: &str = "RELATORIO_APPLY_ROTATION";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Filtro no formato do `EnvFilter`
    pub log_filter: String,

    /// Se a rotação detectada nos relatórios antigos deve ser aplicada.
    /// Desligado, a rotação ainda é detectada e reportada.
    pub apply_rotation: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            log_filter: LOG_DEFAULT.to_string(),
            apply_rotation: true,
        }
    }
}

/// Variável de ambiente com valor inválido, ignorada em favor do padrão.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedVar {
    pub key: &'static str,
    pub value: String,
}

impl CoreConfig {
    /// Os valores rejeitados voltam para quem chama: o logging ainda não
    /// existe quando a configuração é lida.
    pub fn from_env() -> (Self, Vec<RejectedVar>) {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<RejectedVar>) {
        let mut cfg = CoreConfig::default();
        let mut rejected = Vec::new();

        if let Some(filter) = lookup(LOG_ENV).or_else(|| lookup("RUST_LOG")) {
            if !filter.trim().is_empty() {
                cfg.log_filter = filter.trim().to_string();
            }
        }

        if let Some(raw) = lookup(APPLY_ROTATION_ENV) {
            match parse_bool(&raw) {
                Some(v) => cfg.apply_rotation = v,
                None => rejected.push(RejectedVar {
                    key: APPLY_ROTATION_ENV,
                    value: raw,
                }),
            }
        }

        (cfg, rejected)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
