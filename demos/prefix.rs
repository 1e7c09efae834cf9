//! Example demonstrating a struct-level key prefix

use envload::EnvLoad;

#[derive(Debug, Default, EnvLoad)]
#[env(prefix = "MYAPP_")]
struct Config {
    // Reads MYAPP_DATABASE_URL
    #[env(key = "DATABASE_URL", required)]
    pub database_url: String,

    // Reads MYAPP_PORT
    #[env(key = "PORT", default = 8080)]
    pub port: u16,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("MYAPP_DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("MYAPP_PORT", "3000");

    let config = Config::from_env()?;

    println!("Database URL: {}", config.database_url);
    println!("Port: {}", config.port);

    Ok(())
}
