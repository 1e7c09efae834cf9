//! Slices and maps from comma-separated values

use std::collections::{BTreeMap, HashMap};

use envload::EnvLoad;

#[derive(Debug, Default, EnvLoad)]
struct Config {
    // TAGS=frontend,,backend -> ["frontend", "backend"]
    #[env(key = "TAGS", default = "web,api,service")]
    pub tags: Vec<String>,

    #[env(key = "PORTS", default = "8080,9090,3000")]
    pub ports: Vec<u16>,

    #[env(key = "LABELS", default = "env:prod,team:backend")]
    pub labels: BTreeMap<String, String>,

    #[env(key = "FEATURES", default = "cache:true,debug:false")]
    pub features: HashMap<String, bool>,

    #[env(key = "LIMITS", default = "cpu:80,memory:512")]
    pub limits: BTreeMap<String, u32>,
}

fn main() -> anyhow::Result<()> {
    let source = HashMap::from([
        ("TAGS".to_string(), "frontend,,backend, mobile".to_string()),
        ("LABELS".to_string(), "env:staging,env:dev,owner:ops".to_string()),
    ]);

    let config = Config::from_map(&source)?;

    println!("Collections loaded:");
    println!("  Tags: {:?}", config.tags);
    println!("  Ports: {:?}", config.ports);
    println!("  Labels: {:?}", config.labels);
    println!("  Features: {:?}", config.features);
    println!("  Limits: {:?}", config.limits);

    Ok(())
}
