use std::io;

use configs::Environment;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber for the given environment.
/// - `local`: compact text, debug
/// - `development`: JSON, debug
/// - `production`: JSON, info
///
/// `RUST_LOG` overrides the default level in every environment.
pub fn init_logging(env: Environment) {
    match env {
        Environment::Local => init_logging_default(),
        Environment::Development => init_logging_json(default_directives(env)),
        Environment::Production => init_logging_json(default_directives(env)),
    }
}

fn default_directives(env: Environment) -> &'static str {
    match env {
        Environment::Local | Environment::Development => "debug,sqlx=warn,hyper=info",
        Environment::Production => "info,sqlx=warn",
    }
}

/// Compact human-readable output on stdout, debug by default.
pub fn init_logging_default() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(Environment::Local)));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Structured JSON output on stdout for container log collectors.
pub fn init_logging_json(directives: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .json()
        .with_writer(io::stdout)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_is_quieter_than_local() {
        assert!(default_directives(Environment::Production).starts_with("info"));
        assert!(default_directives(Environment::Local).starts_with("debug"));
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(Environment::Local);
        init_logging(Environment::Production);
    }
}
