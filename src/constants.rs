/// PNG 文件开头固定的 8 字节签名长度。
/// 块遍历从这个偏移之后开始。
pub const PNG_SIGNATURE_LEN: usize = 8;

/// PNG 块头部大小：4 字节大端序长度 + 4 字节 ASCII 类型。
pub const PNG_CHUNK_HEADER_LEN: usize = 8;

/// PNG 块尾部 CRC-32 校验和所占的字节数。
pub const PNG_CRC_LEN: usize = 4;

/// IHDR 块总是紧随签名之后，其数据区从文件偏移 16 开始，
/// 前 8 字节依次是大端序的宽度和高度。
pub const PNG_IHDR_DATA_OFFSET: usize = 16;

/// BMP 文件头中像素数组偏移字段 (bfOffBits) 的位置，4 字节小端序。
pub const BMP_PIXEL_OFFSET_FIELD: usize = 10;

/// BITMAPINFOHEADER 中宽度字段的文件偏移，4 字节小端序。
pub const BMP_WIDTH_FIELD: usize = 18;

/// BITMAPINFOHEADER 中高度字段的文件偏移，4 字节小端序。
pub const BMP_HEIGHT_FIELD: usize = 22;

/// 解析 BMP 头部所需的最小文件长度：
/// 14 字节文件头加上信息头中直到高度字段末尾的部分。
pub const BMP_MIN_HEADER_LEN: usize = BMP_HEIGHT_FIELD + 4;

/// 长度前缀所占的位数。
/// 消息长度以一个大端序 `u32` 写入载荷区间前 32 个字节的最低位。
pub const LENGTH_PREFIX_BITS: usize = 32;

/// CRC-32 使用的反射多项式 (IEEE 802.3 / zlib)。
pub const CRC32_POLYNOMIAL: u32 = 0xEDB8_8320;
