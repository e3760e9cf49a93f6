//! Nested records example

use envbind::{Binder, Record};

#[derive(Debug, Default, Record)]
struct Database {
    #[tag(env = "DATABASE_URL")]
    pub url: String,

    #[tag(env = "DATABASE_POOL_SIZE,default=10")]
    pub pool_size: u32,
}

#[derive(Debug, Default, Record)]
struct Tls {
    #[tag(env = "TLS_CERT")]
    pub cert: String,
}

#[derive(Debug, Default, Record)]
struct Config {
    #[tag(env = "LISTEN_PORTS,default=8080")]
    pub listen_ports: Vec<u16>,

    // Always bound
    #[tag(nested)]
    pub database: Database,

    // Only bound when TLS is enabled in code
    #[tag(nested)]
    pub tls: Option<Tls>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("SHOP_DATABASE_URL", "postgres://localhost/shop");
    std::env::set_var("SHOP_LISTEN_PORTS", "8080,8443");
    std::env::set_var("SHOP_TLS_CERT", "/etc/shop/cert.pem");

    let mut config = Config {
        tls: Some(Tls::default()),
        ..Config::default()
    };
    Binder::new().with_prefix("SHOP_").bind(&mut config)?;

    println!("{config:#?}");

    Ok(())
}
