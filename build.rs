use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::Deserialize;

fn main() {
    let out_dir = std::env::var("OUT_DIR").expect("OUT_DIR not set");
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let manifest_dir = PathBuf::from(manifest_dir);

    let config = load_config(&manifest_dir).unwrap_or_else(|err| {
        panic!("failed to load config.toml: {err}");
    });

    if let Err(err) = write_config_rs(&PathBuf::from(&out_dir), &config) {
        panic!("failed to write config: {err}");
    }
}

#[derive(Debug, Deserialize)]
struct Config {
    name: String,
    product_name: String,
    description: String,
    version: String,
    #[serde(default)]
    icon: String,
    #[serde(default = "default_categories")]
    categories: String,
}

fn default_categories() -> String {
    "Graphics;Viewer;".to_string()
}

fn load_config(manifest_dir: &Path) -> io::Result<Config> {
    let config_path = manifest_dir.join("config.toml");
    println!("cargo:rerun-if-changed={}", config_path.display());
    let contents = fs::read_to_string(&config_path)?;
    let cfg: Config = toml::from_str(&contents)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    if cfg.name.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "config.toml name is empty",
        ));
    }
    Ok(cfg)
}

fn write_config_rs(out_dir: &Path, config: &Config) -> io::Result<()> {
    let out_path = out_dir.join("qiv_config.rs");
    let mut file = File::create(&out_path)?;
    writeln!(file, "pub const NAME: &str = {:?};", config.name)?;
    writeln!(
        file,
        "pub const PRODUCT_NAME: &str = {:?};",
        config.product_name
    )?;
    writeln!(
        file,
        "pub const DESCRIPTION: &str = {:?};",
        config.description
    )?;
    writeln!(file, "pub const VERSION: &str = {:?};", config.version)?;
    writeln!(file, "pub const ICON: &str = {:?};", config.icon)?;
    writeln!(file, "pub const CATEGORIES: &str = {:?};", config.categories)?;
    Ok(())
}
