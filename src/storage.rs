use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{Error, Result};

/// 用户配置 (~/.config/pageflow/config.toml)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 转场动画时长（毫秒）
    pub transition_ms: u64,
    /// 按下到抬起水平移动超过这么多列视为滑动
    pub swipe_threshold: u16,
    /// 完成过一次后不再显示
    pub show_once: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transition_ms: 300,
            swipe_threshold: 8,
            show_once: true,
        }
    }
}

impl Config {
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

/// 引导完成记录 (~/.local/share/pageflow/onboarding.toml)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingRecord {
    pub completed_at: DateTime<Local>,
    /// 关闭时停留的页面
    #[serde(default)]
    pub last_page: usize,
}

impl OnboardingRecord {
    pub fn new(last_page: usize) -> Self {
        Self {
            completed_at: Local::now(),
            last_page,
        }
    }
}

/// 读取并解析TOML文件，文件不存在时返回 None
fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let value = toml::from_str(&content).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(value))
}

/// 从TOML文件加载配置，文件不存在时使用默认值
pub fn load_config(path: &Path) -> Result<Config> {
    Ok(load_toml(path)?.unwrap_or_default())
}

/// 读取完成记录
pub fn load_record(path: &Path) -> Result<Option<OnboardingRecord>> {
    load_toml(path)
}

/// 保存完成记录
pub fn save_record(record: &OnboardingRecord, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(record)?;
    fs::write(path, content)?;
    Ok(())
}
