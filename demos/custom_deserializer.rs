//! Field-level deserializer functions for types without a built-in converter

use std::collections::HashMap;
use std::net::SocketAddr;

use envload::EnvLoad;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum LogFormat {
    Json,
    Pretty,
}

fn parse_addrs(s: &str) -> Result<Vec<SocketAddr>, std::net::AddrParseError> {
    s.split(',').map(|addr| addr.trim().parse()).collect()
}

#[derive(Debug, Default, EnvLoad)]
struct Config {
    #[env(key = "LISTEN", deserializer = "parse_addrs", default = "127.0.0.1:8080")]
    pub listen: Vec<SocketAddr>,

    #[env(key = "LOG_FORMATS", deserializer = "serde_json::from_str")]
    pub log_formats: Vec<LogFormat>,
}

fn main() -> anyhow::Result<()> {
    let source = HashMap::from([(
        "LOG_FORMATS".to_string(),
        r#"["json","pretty"]"#.to_string(),
    )]);

    let config = Config::from_map(&source)?;

    println!("Listen: {:?}", config.listen);
    println!("Log formats: {:?}", config.log_formats);

    Ok(())
}
