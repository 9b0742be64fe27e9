use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use cc_settings_converter::config::Config;
use cc_settings_converter::converter::SettingsConverter;
use cc_settings_converter::form::{FormFields, InMemoryForm, SettingsForm};
use cc_settings_converter::routes;
use cc_settings_converter::transport::HttpTransport;

const USAGE: &str = "usage: cc-settings-converter [serve | convert <view-path>]";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        None | Some("serve") => serve(&config).await,
        Some("convert") => {
            let view_path = args.next().context(USAGE)?;
            convert(&config, &view_path).await
        }
        Some(other) => bail!("unknown command '{}'; {}", other, USAGE),
    }
}

async fn serve(config: &Config) -> Result<()> {
    tracing::info!("cc-settings-converter starting");
    config.log_startup();

    let listener = tokio::net::TcpListener::bind((config.service_host.as_str(), config.service_port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.service_host, config.service_port))?;

    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, routes::router())
        .await
        .context("Server error")
}

async fn convert(config: &Config, old_view_path: &str) -> Result<()> {
    let transport = HttpTransport::new(&config.converter_base_url)?;
    let fields = FormFields::default();
    let mut form = InMemoryForm::new(&fields).with_value(&fields.view_path, old_view_path);

    let converter = SettingsConverter::new(transport, fields.clone());
    let outcome = converter.convert_settings(&mut form).await;

    if let Some(alert) = outcome.alert_message() {
        bail!(alert);
    }

    println!("{}={}", fields.view_path, form.value(&fields.view_path));
    println!("{}={}", fields.cc_view_path, form.value(&fields.cc_view_path));
    println!("{}={}", fields.rel_path, form.value(&fields.rel_path));

    Ok(())
}
