//! Basic usage example

use envbind::Record;

#[derive(Debug, Default, Record)]
struct Config {
    // Required: loaded from APP_NAME
    #[tag(env = "APP_NAME")]
    pub app_name: String,

    // With default value
    #[tag(env = "PORT,default=8080")]
    pub port: u16,

    // Boolean type
    #[tag(env = "DEBUG,optional")]
    pub debug: bool,

    // Comma-separated list
    #[tag(env = "ALLOWED_HOSTS,default=localhost")]
    pub allowed_hosts: Vec<String>,

    // Not tagged, never touched
    pub build: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("envbind=debug")),
        )
        .init();

    // Set environment variables for demonstration
    std::env::set_var("APP_NAME", "svc");
    std::env::set_var("ALLOWED_HOSTS", "localhost,example.com");

    let mut config = Config {
        build: env!("CARGO_PKG_VERSION").to_string(),
        ..Config::default()
    };
    envbind::bind(&mut config)?;

    println!("Configuration loaded:");
    println!("  App Name: {}", config.app_name);
    println!("  Port: {}", config.port);
    println!("  Debug: {}", config.debug);
    println!("  Allowed Hosts: {:?}", config.allowed_hosts);
    println!("  Build: {}", config.build);

    Ok(())
}
