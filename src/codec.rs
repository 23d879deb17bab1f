//! # 位通道编解码模块
//!
//! 嵌入与提取协议：先把消息长度作为 32 位大端序前缀写入载荷区间
//! 前 32 个字节的最低位，随后按字节的高位在前顺序写入消息本身，
//! 每个位占用下一个载荷字节的最低位，其余 7 位保持不变。
//! 提取是同一过程的逆运算。

use crate::constants::LENGTH_PREFIX_BITS;
use crate::container::{ImageFormat, RawImage};
use crate::crc32;
use crate::error::StegoError;

/// 在一段字节切片的最低位上顺序写入的位游标。
/// 不变量：`0 <= cursor <= bytes.len() * 8`，每个字节只承载一个位。
struct BitWriter<'a> {
    bytes: &'a mut [u8],
    cursor: usize,
}

impl<'a> BitWriter<'a> {
    fn new(bytes: &'a mut [u8]) -> Self {
        Self { bytes, cursor: 0 }
    }

    /// 把一个位写入下一个字节的最低位。区间耗尽时返回 `false`，
    /// 多余的位被静默丢弃而不是触发越界。
    fn push(&mut self, bit: bool) -> bool {
        let Some(byte) = self.bytes.get_mut(self.cursor) else {
            return false;
        };

        *byte = (*byte & !1) | u8::from(bit);
        self.cursor += 1;
        true
    }

    /// 高位在前地写入一个 `u32`。
    fn push_u32(&mut self, value: u32) {
        for shift in (0..32).rev() {
            self.push(value >> shift & 1 == 1);
        }
    }

    /// 高位在前地写入一个字节的 8 个位。
    fn push_byte(&mut self, value: u8) {
        for shift in (0..8).rev() {
            self.push(value >> shift & 1 == 1);
        }
    }
}

/// [`BitWriter`] 的只读对应物，按同样的顺序读出最低位。
struct BitReader<'a> {
    bytes: &'a [u8],
    cursor: usize,
}

impl<'a> BitReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, cursor: 0 }
    }

    fn next(&mut self) -> Option<bool> {
        let bit = self.bytes.get(self.cursor).map(|byte| byte & 1 == 1)?;
        self.cursor += 1;
        Some(bit)
    }

    /// 读出 32 个位并按高位在前组装成 `u32`。区间不足时缺失的位按 0 计。
    fn read_u32(&mut self) -> u32 {
        (0..32).fold(0, |acc, _| (acc << 1) | u32::from(self.next().unwrap_or(false)))
    }

    /// 读出 8 个位组装成一个字节；区间耗尽时返回 `None`。
    fn read_byte(&mut self) -> Option<u8> {
        let mut value = 0u8;
        for _ in 0..8 {
            value = (value << 1) | u8::from(self.next()?);
        }
        Some(value)
    }

    /// 剩余的位还能组装出多少个完整字节。
    fn remaining_bytes(&self) -> usize {
        (self.bytes.len() - self.cursor) / 8
    }
}

/// 容量判定：消息连同 32 位长度前缀能否装入给定长度的载荷区间。
/// 每个载荷字节只承载一个位，N 字节的区间只能容纳 N 个位。
/// 纯函数，任何改写操作之前都必须先通过它。
pub fn fits(payload_len: usize, message_len: usize) -> bool {
    message_len
        .checked_mul(8)
        .and_then(|bits| bits.checked_add(LENGTH_PREFIX_BITS))
        .is_some_and(|required| required <= payload_len)
}

/// 把 `message` 嵌入载荷区间，并在 PNG 上修复受影响的 IDAT 校验和。
///
/// 容量不足时缓冲保持原样。落盘由调用方负责。
///
/// # Errors
///
/// 消息装不下时返回 [`StegoError::Capacity`]；PNG 校验和修复阶段
/// 发现块结构越界时返回 [`StegoError::MalformedContainer`]。
pub fn embed(image: &mut RawImage, message: &[u8]) -> Result<(), StegoError> {
    let payload_len = image.payload.len();

    let capacity_error = || StegoError::Capacity {
        required: LENGTH_PREFIX_BITS.saturating_add(message.len().saturating_mul(8)),
        available: payload_len,
    };

    // 长度前缀是一个 u32，超出其表示范围的消息同样视为装不下
    let declared = u32::try_from(message.len()).map_err(|_| capacity_error())?;

    if !fits(payload_len, message.len()) {
        return Err(capacity_error());
    }

    let range = image.payload.clone();
    let mut writer = BitWriter::new(&mut image.bytes[range]);

    writer.push_u32(declared);
    for &byte in message {
        writer.push_byte(byte);
    }

    if image.format == ImageFormat::Png {
        crc32::repair_idat_checksums(&mut image.bytes)?;
    }

    Ok(())
}

/// 从载荷区间读回嵌入的消息。
///
/// 先重建 32 位长度前缀，再逐字节读出消息本身。语法上总是成功：
/// 对从未嵌入过消息的图像调用会得到无意义的输出，这是已知行为而
/// 不是错误。无论前缀声明多长，读取都在载荷区间耗尽处停止。
pub fn extract(image: &RawImage) -> Vec<u8> {
    let mut reader = BitReader::new(&image.bytes[image.payload.clone()]);

    let declared = reader.read_u32() as usize;
    let mut message = Vec::with_capacity(declared.min(reader.remaining_bytes()));

    while message.len() < declared {
        let Some(byte) = reader.read_byte() else {
            break;
        };
        message.push(byte);
    }

    message
}
