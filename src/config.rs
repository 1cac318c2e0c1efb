// Constants generated by build.rs from config.toml at the repo root.
include!(concat!(env!("OUT_DIR"), "/qiv_config.rs"));
