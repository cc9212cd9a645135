use tracing_subscriber::EnvFilter;

use crate::config::CoreConfig;

fn create_env_filter(cfg: &CoreConfig) -> EnvFilter {
    EnvFilter::try_new(&cfg.log_filter).unwrap_or_else(|err| {
        // logging ainda não existe aqui
        eprintln!("invalid log filter {:?}: {err}", cfg.log_filter);
        EnvFilter::new(crate::config::LOG_DEFAULT)
    })
}

/// Instala o subscriber global. Escreve em stderr: stdout é do protocolo.
pub fn init(cfg: &CoreConfig) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(create_env_filter(cfg))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if let Err(e) = result {
        eprintln!("failed to install tracing subscriber: {e}");
    }
}
