use std::io::{self, BufRead, Write};

use relatorio_core::config::CoreConfig;
use relatorio_core::{logging, protocol};
use tracing::{error, info, warn};

fn main() {
    let (cfg, rejected) = CoreConfig::from_env();
    logging::init(&cfg);

    for var in &rejected {
        warn!(key = var.key, value = %var.value, "ignoring invalid environment variable");
    }

    info!(apply_rotation = cfg.apply_rotation, "relatorio-core started");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => continue,
        };

        if line.trim().is_empty() {
            continue;
        }

        let result = std::panic::catch_unwind(|| protocol::handle(&line, &cfg));

        let response = match result {
            Ok(resp) => resp,
            Err(_) => {
                error!("request handler panicked");
                serde_json::json!({
                    "status": "error",
                    "message": "internal core error"
                })
                .to_string()
            }
        };

        if writeln!(stdout, "{response}").is_err() {
            break;
        }

        let _ = stdout.flush();
    }
}
