//! Load configuration once and share it across the process

use std::sync::OnceLock;

use envload::EnvLoad;

#[derive(Debug, Default, EnvLoad)]
struct Config {
    #[env(key = "APP_NAME", default = "MyApp")]
    pub app_name: String,

    #[env(key = "WORKERS", default = 4)]
    pub workers: usize,
}

static CONFIG: OnceLock<Config> = OnceLock::new();

fn config() -> &'static Config {
    // A missing .env file degrades to defaults with a warning
    CONFIG.get_or_init(|| Config::from_env_file(".env").unwrap_or_default())
}

fn main() {
    tracing_subscriber::fmt().init();

    let handles: Vec<_> = (0..3)
        .map(|i| std::thread::spawn(move || println!("thread {i}: {:?}", config())))
        .collect();
    for handle in handles {
        let _ = handle.join();
    }
}
