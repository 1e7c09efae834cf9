//! Basic usage: load a `.env` file into a config struct

use std::time::Duration;

use envload::EnvLoad;

#[derive(Debug, Default, EnvLoad)]
struct Config {
    #[env(key = "APP_NAME", default = "DefaultApp")]
    pub app_name: String,

    #[env(key = "PORT", default = 3000)]
    pub port: u16,

    #[env(key = "DEBUG", default = false)]
    pub debug: bool,

    #[env(key = "TIMEOUT", default = "10s")]
    pub timeout: Duration,
}

fn main() -> anyhow::Result<()> {
    use std::io::Write;
    use tempfile::NamedTempFile;

    tracing_subscriber::fmt()
        .with_env_filter("envload=debug")
        .init();

    let mut env_file = NamedTempFile::new()?;
    writeln!(env_file, "APP_NAME=MyApp")?;
    writeln!(env_file, "PORT=8080")?;
    writeln!(env_file, "TIMEOUT=1m30s")?;

    let config = Config::from_env_file(env_file.path())?;

    println!("Configuration loaded:");
    println!("  App Name: {}", config.app_name);
    println!("  Port: {}", config.port);
    println!("  Debug: {}", config.debug);
    println!("  Timeout: {:?}", config.timeout);

    Ok(())
}
