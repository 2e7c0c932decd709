use clap::Parser;
use text_service::AppConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "text-service")]
#[command(about = "Prompt-to-text HTTP service backed by Gemini")]
#[command(version)]
struct Cli {
    /// Bind address (overrides APP_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Server port (overrides APP_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true)
                .with_file(false),
        )
        .init();
}

#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let mut config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    cli.apply(&mut config);

    tracing::info!("Starting standalone text service...");
    tracing::debug!("Configuration: {:?}", config);

    if let Err(e) = text_service::server::run(config).await {
        tracing::error!("Failed to run text service: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn base_config() -> AppConfig {
        AppConfig {
            api_key: "k".to_string(),
            api_base: "http://localhost".to_string(),
            text_model: "gemini-2.5-flash".to_string(),
            request_timeout: Duration::from_secs(60),
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }

    #[test]
    fn flags_override_environment_values() {
        let cli = Cli::try_parse_from(["text-service", "--host", "127.0.0.1", "--port", "9090"])
            .unwrap();
        let mut config = base_config();
        cli.apply(&mut config);
        assert_eq!(config.bind_address(), "127.0.0.1:9090");
    }

    #[test]
    fn absent_flags_keep_environment_values() {
        let cli = Cli::try_parse_from(["text-service"]).unwrap();
        assert_eq!(cli.log_level, "info");
        let mut config = base_config();
        cli.apply(&mut config);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn invalid_port_flag_is_rejected() {
        assert!(Cli::try_parse_from(["text-service", "--port", "http"]).is_err());
    }
}
