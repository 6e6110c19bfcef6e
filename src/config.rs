use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::OverlapPolicy;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/process/";

/// 配置文件结构（所有字段可选）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub overlap: OverlapPolicy,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            overlap: OverlapPolicy::default(),
            log_file: None,
        }
    }
}

/// 命令行覆盖项
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub overlap: Option<OverlapPolicy>,
}

impl Config {
    /// 命令行参数优先于配置文件
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(endpoint) = overrides.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(overlap) = overrides.overlap {
            self.overlap = overlap;
        }
        self
    }
}

/// 默认配置文件路径 (~/.config/caddie/config.toml)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("caddie").join("config.toml"))
}

/// 获取数据目录路径 (~/.local/share/caddie/)
pub fn data_dir() -> io::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "cannot locate user data directory"))?
        .join("caddie");

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// 从TOML文件加载配置，文件不存在时使用默认值
pub fn load_config(path: &Path) -> io::Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// 加载用户显式指定的配置文件，文件必须存在
pub fn load_required_config(path: &Path) -> io::Result<Config> {
    if !path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("config file {} does not exist", path.display()),
        ));
    }
    load_config(path)
}
