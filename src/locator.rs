//! # 载荷定位模块
//!
//! 针对每种容器格式，从原始字节中找出可以安全改写最低位的
//! 半开区间 `[begin, end)`，以及信息头里的宽度和高度。
//! 区间之外的字节承载格式关键的元数据，改动它们会使文件
//! 无法再被解码为图像。

use crate::constants::{
    BMP_HEIGHT_FIELD, BMP_MIN_HEADER_LEN, BMP_PIXEL_OFFSET_FIELD, BMP_WIDTH_FIELD,
    PNG_CHUNK_HEADER_LEN, PNG_CRC_LEN, PNG_IHDR_DATA_OFFSET, PNG_SIGNATURE_LEN,
};
use crate::container::ImageFormat;
use crate::error::StegoError;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::ops::Range;

/// 一个 PNG 块在文件中的位置：`offset` 指向 4 字节长度字段的开头。
#[derive(Debug, Clone, Copy)]
pub(crate) struct Chunk {
    offset: usize,
    length: usize,
}

impl Chunk {
    /// 块类型字段 (4 字节 ASCII) 的起始偏移。
    pub(crate) fn type_offset(&self) -> usize {
        self.offset + 4
    }

    /// 块数据区的起始偏移。
    pub(crate) fn data_start(&self) -> usize {
        self.offset + PNG_CHUNK_HEADER_LEN
    }

    /// 块数据区之后的第一个偏移，也是 CRC 尾部的起点。
    pub(crate) fn data_end(&self) -> usize {
        self.data_start() + self.length
    }

    pub(crate) fn is_idat(&self, bytes: &[u8]) -> bool {
        &bytes[self.type_offset()..self.type_offset() + 4] == b"IDAT"
    }
}

/// 从签名之后开始遍历所有 PNG 块，并做边界检查。
///
/// # Errors
///
/// 块头或块体越过缓冲区末尾时返回 [`StegoError::MalformedContainer`]。
pub(crate) fn walk_chunks(bytes: &[u8]) -> Result<Vec<Chunk>, StegoError> {
    let mut chunks = Vec::new();
    let mut pos = PNG_SIGNATURE_LEN;

    while pos < bytes.len() {
        if pos + PNG_CHUNK_HEADER_LEN > bytes.len() {
            return Err(StegoError::MalformedContainer(
                "chunk header extends past end of file",
            ));
        }

        let length = BigEndian::read_u32(&bytes[pos..pos + 4]) as usize;
        let chunk = Chunk { offset: pos, length };

        if chunk.data_end() + PNG_CRC_LEN > bytes.len() {
            return Err(StegoError::MalformedContainer(
                "chunk data extends past end of file",
            ));
        }

        chunks.push(chunk);
        pos = chunk.data_end() + PNG_CRC_LEN;
    }

    Ok(chunks)
}

/// 计算给定格式下的载荷区间。
///
/// * PNG：从第一个 IDAT 块的数据起点到最后一个 IDAT 块的数据终点。
///   若两者之间夹有非 IDAT 块，其字节同样落入区间，与原始工具的
///   输出保持逐字节兼容。
/// * BMP：从 bfOffBits 字段指向的像素数组起点到文件末尾。
///
/// # Errors
///
/// PNG 中不存在 IDAT 块、块结构越界，或 BMP 头部过短、像素数组
/// 偏移超出文件长度时，返回 [`StegoError::MalformedContainer`]。
pub fn payload_range(format: ImageFormat, bytes: &[u8]) -> Result<Range<usize>, StegoError> {
    match format {
        ImageFormat::Png => {
            let chunks = walk_chunks(bytes)?;
            let mut idat = chunks.iter().filter(|chunk| chunk.is_idat(bytes));

            let first = idat
                .next()
                .ok_or(StegoError::MalformedContainer("IDAT not found"))?;
            let last = idat.last().unwrap_or(first);

            Ok(first.data_start()..last.data_end())
        }
        ImageFormat::Bmp => {
            if bytes.len() < BMP_MIN_HEADER_LEN {
                return Err(StegoError::MalformedContainer("BMP header truncated"));
            }

            let begin = LittleEndian::read_u32(
                &bytes[BMP_PIXEL_OFFSET_FIELD..BMP_PIXEL_OFFSET_FIELD + 4],
            ) as usize;

            if begin > bytes.len() {
                return Err(StegoError::MalformedContainer(
                    "pixel array offset beyond end of file",
                ));
            }

            Ok(begin..bytes.len())
        }
    }
}

/// 从信息头中读出宽度和高度。
/// 仅供 `info` 报告使用，编解码逻辑不依赖这两个值。
///
/// # Errors
///
/// 缓冲区短于对应格式的头部时返回 [`StegoError::MalformedContainer`]。
pub fn dimensions(format: ImageFormat, bytes: &[u8]) -> Result<(u32, u32), StegoError> {
    match format {
        ImageFormat::Png => {
            if bytes.len() < PNG_IHDR_DATA_OFFSET + 8 {
                return Err(StegoError::MalformedContainer("IHDR truncated"));
            }

            let width = BigEndian::read_u32(&bytes[PNG_IHDR_DATA_OFFSET..]);
            let height = BigEndian::read_u32(&bytes[PNG_IHDR_DATA_OFFSET + 4..]);
            Ok((width, height))
        }
        ImageFormat::Bmp => {
            if bytes.len() < BMP_MIN_HEADER_LEN {
                return Err(StegoError::MalformedContainer("BMP header truncated"));
            }

            let width = LittleEndian::read_u32(&bytes[BMP_WIDTH_FIELD..]);
            let height = LittleEndian::read_u32(&bytes[BMP_HEIGHT_FIELD..]);
            Ok((width, height))
        }
    }
}
