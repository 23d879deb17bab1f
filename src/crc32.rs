//! # CRC-32 引擎模块
//!
//! 表驱动的反射 CRC-32 (多项式 `0xEDB88320`，即 IEEE 802.3 / zlib 标准)。
//! 嵌入操作改写 IDAT 数据后，必须用它重新计算并回写每个 IDAT 块
//! 尾部的校验和，否则严格的 PNG 读取器会拒绝渲染该文件。

use crate::constants::CRC32_POLYNOMIAL;
use crate::error::StegoError;
use crate::locator;
use byteorder::{BigEndian, ByteOrder};

/// 持有一张 256 项查找表的 CRC-32 计算器。
pub struct Crc32 {
    table: [u32; 256],
}

impl Crc32 {
    /// 构建查找表：对每个字节值做 8 轮多项式除法。
    pub fn new() -> Self {
        let mut table = [0u32; 256];
        for (value, entry) in table.iter_mut().enumerate() {
            let mut crc = value as u32;
            for _ in 0..8 {
                crc = if crc & 1 != 0 {
                    (crc >> 1) ^ CRC32_POLYNOMIAL
                } else {
                    crc >> 1
                };
            }
            *entry = crc;
        }
        Self { table }
    }

    /// 按顺序处理 `data` 的每个字节，每字节一次查表。
    /// 初始值 `0xFFFFFFFF`，结果再与 `0xFFFFFFFF` 异或。
    pub fn checksum(&self, data: &[u8]) -> u32 {
        let mut crc = u32::MAX;
        for &byte in data {
            let index = ((crc ^ u32::from(byte)) & 0xFF) as usize;
            crc = (crc >> 8) ^ self.table[index];
        }
        crc ^ u32::MAX
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

/// 重新计算并回写每个 IDAT 块尾部的 4 字节大端序校验和。
///
/// 校验范围是块类型加块数据 (4 + length 字节)，与 PNG 规范一致。
///
/// # Errors
///
/// 如果块遍历发现某个块越过了缓冲区末尾，将返回
/// [`StegoError::MalformedContainer`]。
pub fn repair_idat_checksums(bytes: &mut [u8]) -> Result<(), StegoError> {
    let crc = Crc32::new();

    for chunk in locator::walk_chunks(bytes)? {
        if !chunk.is_idat(bytes) {
            continue;
        }

        let value = crc.checksum(&bytes[chunk.type_offset()..chunk.data_end()]);
        BigEndian::write_u32(&mut bytes[chunk.data_end()..chunk.data_end() + 4], value);
    }

    Ok(())
}
