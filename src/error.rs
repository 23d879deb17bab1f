//! # 错误类型模块
//!
//! 定义编解码器对外暴露的所有错误种类。
//! CLI 层使用 `anyhow` 为这些错误补充上下文，核心库本身只返回此处的类型。

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 核心库的统一错误类型。
#[derive(Error, Debug)]
pub enum StegoError {
    /// 文件无法打开、读取或写入。
    #[error("I/O error on '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 文件扩展名既不是 `.png` 也不是 `.bmp`。
    #[error("Unsupported file format: '{0}'")]
    UnsupportedFormat(String),

    /// 容器结构损坏，无法定位载荷区间。
    /// 例如 PNG 中不存在 IDAT 块，或某个块头越过了文件末尾。
    #[error("Malformed container: {0}")]
    MalformedContainer(&'static str),

    /// 消息连同长度前缀所需的位数超出了载荷区间可提供的位数。
    /// 此错误不修改任何字节。
    #[error("Message cannot fit inside the image: required {required} bits, available {available} bits")]
    Capacity { required: usize, available: usize },
}
