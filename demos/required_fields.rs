//! Required fields and how errors are reported

use std::collections::HashMap;

use envload::{EnvLoad, EnvLoadError};

#[derive(Debug, Default, EnvLoad)]
struct Config {
    #[env(key = "DATABASE_URL", required)]
    pub database_url: String,

    // Required, but the default always satisfies it
    #[env(key = "APP_NAME", required, default = "MyApp")]
    pub app_name: String,

    #[env(key = "RETRIES", default = 3)]
    pub retries: u8,
}

fn main() {
    match Config::from_map(&HashMap::new()) {
        Err(EnvLoadError::MissingRequiredField { field, key }) => {
            println!("missing {field} (set {key})");
        }
        other => println!("unexpected: {other:?}"),
    }

    let source = HashMap::from([
        ("DATABASE_URL".to_string(), "postgres://localhost/db".to_string()),
        ("RETRIES".to_string(), "300".to_string()),
    ]);
    if let Err(err) = Config::from_map(&source) {
        println!("error: {err}");
    }
}
