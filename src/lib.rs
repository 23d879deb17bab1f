//! # bytehide 库
//!
//! 本库包含直接在 PNG / BMP 原始字节上工作的 LSB 隐写编解码器。

// 声明库包含的所有模块。

pub mod cli;
pub mod codec;
pub mod constants;
pub mod container;
pub mod crc32;
pub mod error;
pub mod handler;
pub mod locator;
