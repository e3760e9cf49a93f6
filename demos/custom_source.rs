//! Binding from a map instead of the process environment
//!
//! Useful for tests, or for values collected from somewhere else
//! (a `.env` file parsed by the application, command-line overrides).

use envbind::{BindError, Binder, Record};
use std::collections::BTreeMap;

#[derive(Debug, Default, Record)]
struct Config {
    #[tag(env = "WORKERS", flag = "workers,default=1")]
    pub workers: usize,

    #[tag(env = "RATIO,optional", flag = "ratio,optional")]
    pub ratio: f64,
}

fn main() -> anyhow::Result<()> {
    let mut vars = BTreeMap::new();
    vars.insert("WORKERS".to_string(), "4".to_string());
    vars.insert("ratio".to_string(), "0.25".to_string());

    // Reads `env` tags
    let mut from_env_tags = Config::default();
    Binder::new().with_source(&vars).bind(&mut from_env_tags)?;
    println!("env tags:  {from_env_tags:?}");

    // Reads `flag` tags from the same map
    let mut from_flag_tags = Config::default();
    Binder::new()
        .with_tag_key("flag")
        .with_source(&vars)
        .bind(&mut from_flag_tags)?;
    println!("flag tags: {from_flag_tags:?}");

    // Errors name the field, the variable and the rejected text
    vars.insert("WORKERS".to_string(), "four".to_string());
    match Binder::new().with_source(&vars).bind(&mut Config::default()) {
        Err(e @ BindError::Conversion { .. }) => println!("error:     {e}"),
        other => println!("unexpected: {other:?}"),
    }

    Ok(())
}
