// %APPDATA%\ReadAssist for settings, %LOCALAPPDATA%\ReadAssist for data.

use std::env;
use std::path::PathBuf;

fn env_dir(var: &str) -> PathBuf {
    PathBuf::from(env::var(var).unwrap_or_else(|_| String::from("C:\\Temp"))).join("ReadAssist")
}

pub fn get_config_dir() -> PathBuf {
    env_dir("APPDATA")
}

pub fn get_data_dir() -> PathBuf {
    env_dir("LOCALAPPDATA")
}
