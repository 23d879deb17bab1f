//! # 容器模型模块
//!
//! 持有图像文件的完整字节缓冲及定位结果。
//! 缓冲由 [`RawImage`] 独占，嵌入操作只在载荷区间内原地改写，
//! 落盘由调用方通过 [`RawImage::save`] 完成。

use crate::error::StegoError;
use crate::locator;
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::ops::Range;
use std::path::Path;
use std::time::SystemTime;

/// 支持的容器格式，在加载时根据文件扩展名确定一次，之后不变。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Bmp,
}

impl ImageFormat {
    /// 根据扩展名判定格式。只接受小写的 `.png` 和 `.bmp`。
    ///
    /// # Errors
    ///
    /// 其他扩展名 (含缺失扩展名) 返回 [`StegoError::UnsupportedFormat`]。
    pub fn from_path(path: &Path) -> Result<Self, StegoError> {
        match path.extension().and_then(OsStr::to_str) {
            Some("png") => Ok(Self::Png),
            Some("bmp") => Ok(Self::Bmp),
            other => Err(StegoError::UnsupportedFormat(
                other.map_or_else(|| String::from("(no extension)"), str::to_owned),
            )),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png => write!(f, "PNG"),
            Self::Bmp => write!(f, "BMP"),
        }
    }
}

/// 一张已定位载荷区间的图像。
///
/// 构造即完成定位：拿到 `RawImage` 就意味着
/// `0 <= payload.start <= payload.end <= bytes.len()` 成立。
pub struct RawImage {
    pub(crate) bytes: Vec<u8>,
    pub(crate) format: ImageFormat,
    pub(crate) payload: Range<usize>,
    width: u32,
    height: u32,
}

impl RawImage {
    /// 读取整个文件，判定格式，定位载荷区间并解析宽高。
    ///
    /// # Errors
    ///
    /// 扩展名不受支持、文件不可读或容器结构损坏时返回相应错误。
    pub fn load(path: &Path) -> Result<Self, StegoError> {
        let format = ImageFormat::from_path(path)?;
        let bytes = fs::read(path).map_err(|source| StegoError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_bytes(format, bytes)
    }

    /// 从一个已在内存中的缓冲构造图像，定位逻辑与 [`RawImage::load`] 相同。
    ///
    /// # Errors
    ///
    /// 容器结构损坏时返回 [`StegoError::MalformedContainer`]。
    pub fn from_bytes(format: ImageFormat, bytes: Vec<u8>) -> Result<Self, StegoError> {
        let payload = locator::payload_range(format, &bytes)?;
        let (width, height) = locator::dimensions(format, &bytes)?;

        Ok(Self {
            bytes,
            format,
            payload,
            width,
            height,
        })
    }

    /// 把缓冲写回到 `path`。
    ///
    /// # Errors
    ///
    /// 目标文件不可写时返回 [`StegoError::Io`]。
    pub fn save(&self, path: &Path) -> Result<(), StegoError> {
        fs::write(path, &self.bytes).map_err(|source| StegoError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// 缓冲的总字节数，即文件大小。
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// 可以安全改写最低位的半开字节区间。
    pub fn payload_range(&self) -> Range<usize> {
        self.payload.clone()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 消耗自身，把缓冲的所有权移交给调用方。
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// `info` 命令展示的元数据快照。
pub struct ImageInfo {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub size_bytes: usize,
    pub last_modified: Option<SystemTime>,
}

/// 只读地收集一张图像的元数据，不做任何改写。
///
/// 修改时间来自文件系统元数据；个别文件系统不提供它，此时为 `None`。
///
/// # Errors
///
/// 与 [`RawImage::load`] 的失败条件相同。
pub fn describe(path: &Path) -> Result<ImageInfo, StegoError> {
    let image = RawImage::load(path)?;
    let last_modified = fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok();

    Ok(ImageInfo {
        format: image.format,
        width: image.width,
        height: image.height,
        size_bytes: image.bytes.len(),
        last_modified,
    })
}
