//! 错误类型
//!
//! 导航本身从不向上抛错（越界、找不到页面都只记录日志），
//! 这里只覆盖宿主层：终端 I/O、配置与完成记录的读写。

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("终端 I/O 错误: {0}")]
    Io(#[from] io::Error),

    #[error("无法解析 {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("无法序列化完成记录: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("无法获取用户{0}目录")]
    NoUserDir(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
