use byteorder::{BigEndian, ByteOrder, LittleEndian};
use bytehide::codec;
use bytehide::container::{ImageFormat, RawImage};
use bytehide::crc32::Crc32;
use bytehide::error::StegoError;

/// 构造一个最小的 BMP：54 字节头部后跟 `pixel_bytes` 个带图案的像素字节
fn build_bmp(pixel_bytes: usize) -> Vec<u8> {
    let total = 54 + pixel_bytes;
    let mut bytes = vec![0u8; total];

    bytes[0] = b'B';
    bytes[1] = b'M';
    LittleEndian::write_u32(&mut bytes[2..6], total as u32);
    LittleEndian::write_u32(&mut bytes[10..14], 54); // bfOffBits
    LittleEndian::write_u32(&mut bytes[14..18], 40); // BITMAPINFOHEADER
    LittleEndian::write_u32(&mut bytes[18..22], 10); // width
    LittleEndian::write_u32(&mut bytes[22..26], 10); // height
    LittleEndian::write_u16(&mut bytes[26..28], 1); // planes
    LittleEndian::write_u16(&mut bytes[28..30], 24); // bits per pixel

    // 像素区域填充非平凡的图案，便于发现高 7 位被误改的情况
    for (i, byte) in bytes[54..].iter_mut().enumerate() {
        *byte = (i % 251) as u8;
    }

    bytes
}

/// 序列化一个 PNG 块，CRC 覆盖类型和数据
fn png_chunk(kind: &[u8; 4], data: &[u8], crc: &Crc32) -> Vec<u8> {
    let mut out = Vec::with_capacity(12 + data.len());
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);

    let mut typed = kind.to_vec();
    typed.extend_from_slice(data);
    out.extend_from_slice(&crc.checksum(&typed).to_be_bytes());

    out
}

/// 构造一个合成 PNG：签名 + IHDR + 若干指定长度的 IDAT + IEND
fn build_png(idat_lens: &[usize]) -> Vec<u8> {
    let crc = Crc32::new();
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    let mut ihdr = [0u8; 13];
    BigEndian::write_u32(&mut ihdr[0..4], 10); // width
    BigEndian::write_u32(&mut ihdr[4..8], 10); // height
    ihdr[8] = 8; // bit depth
    ihdr[9] = 2; // color type
    bytes.extend(png_chunk(b"IHDR", &ihdr, &crc));

    for (n, &len) in idat_lens.iter().enumerate() {
        let data: Vec<u8> = (0..len).map(|i| (i + n * 7) as u8).collect();
        bytes.extend(png_chunk(b"IDAT", &data, &crc));
    }

    bytes.extend(png_chunk(b"IEND", &[], &crc));
    bytes
}

/// 验证规格中的具体场景：10x10 的 24 位 BMP (bfOffBits = 54) 嵌入 "hi"
#[test]
fn bmp_embed_writes_length_prefix_and_message_bits() {
    // 10 像素一行，每行 30 字节补齐到 32，共 320 字节像素数据
    let original = build_bmp(320);
    let mut image = RawImage::from_bytes(ImageFormat::Bmp, original.clone()).unwrap();
    assert_eq!(image.payload_range(), 54..374);

    codec::embed(&mut image, b"hi").unwrap();
    let bytes = image.bytes();

    // 长度前缀：值 2 的大端序 32 位，落在字节 [54..86) 的最低位
    for i in 0..32 {
        let expected = (2u32 >> (31 - i)) & 1;
        assert_eq!(
            u32::from(bytes[54 + i] & 1),
            expected,
            "length prefix bit {} mismatch",
            i
        );
    }

    // 'h' = 0x68 和 'i' = 0x69 的 16 个位，落在字节 [86..102) 的最低位
    for (i, &ch) in [0x68u8, 0x69u8].iter().enumerate() {
        for bit in 0..8 {
            let expected = (ch >> (7 - bit)) & 1;
            assert_eq!(
                bytes[86 + i * 8 + bit] & 1,
                expected,
                "message bit {} of byte {} mismatch",
                bit,
                i
            );
        }
    }

    // 头部字节逐一不变，载荷字节只许最低位不同
    assert_eq!(&bytes[..54], &original[..54]);
    for (after, before) in bytes[54..].iter().zip(&original[54..]) {
        assert_eq!(after & 0xFE, before & 0xFE);
    }

    assert_eq!(codec::extract(&image), b"hi");
}

/// 验证容量判定在等式成立点和成立点加一处翻转
#[test]
fn capacity_boundary_flips_at_exact_fit() {
    // 每个载荷字节承载一个位：288 字节去掉 32 位前缀正好容纳 32 字节消息
    assert!(codec::fits(288, 32));
    assert!(!codec::fits(288, 33));

    // 位数计算溢出时一律按装不下处理
    assert!(!codec::fits(usize::MAX, usize::MAX));

    let original = build_bmp(288);
    let mut image = RawImage::from_bytes(ImageFormat::Bmp, original.clone()).unwrap();

    let exact = vec![0xA5u8; 32];
    codec::embed(&mut image, &exact).unwrap();
    assert_eq!(codec::extract(&image), exact);

    // 超出一字节：返回容量错误且缓冲保持原样
    let mut untouched = RawImage::from_bytes(ImageFormat::Bmp, original.clone()).unwrap();
    let result = codec::embed(&mut untouched, &vec![0x5Au8; 33]);
    assert!(matches!(
        result,
        Err(StegoError::Capacity {
            required: 296,
            available: 288
        })
    ));
    assert_eq!(untouched.bytes(), &original[..]);
}

/// 验证 PNG 上的往返提取以及嵌入后 IDAT 校验和的有效性
#[test]
fn png_round_trip_repairs_idat_checksum() {
    let original = build_png(&[200]);
    let mut image = RawImage::from_bytes(ImageFormat::Png, original.clone()).unwrap();

    // 签名 8 字节 + IHDR 块 25 字节，IDAT 数据区从 41 开始
    assert_eq!(image.payload_range(), 41..241);

    // 200 个载荷字节 = 200 位，8 字节消息共需 32 + 64 = 96 位
    let message = b"a secret";
    codec::embed(&mut image, message).unwrap();
    assert_eq!(codec::extract(&image), message);

    let bytes = image.bytes();

    // IDAT 的 CRC 覆盖类型 + 数据 [37..241)，尾部 4 字节必须与之一致
    let crc = Crc32::new();
    let stored = BigEndian::read_u32(&bytes[241..245]);
    assert_eq!(crc.checksum(&bytes[37..241]), stored);

    // 载荷之前的字节和 CRC 尾部之后的字节逐一不变
    assert_eq!(&bytes[..41], &original[..41]);
    assert_eq!(&bytes[245..], &original[245..]);

    // 重新加载改写后的缓冲，提取结果必须一致
    let reloaded = RawImage::from_bytes(ImageFormat::Png, bytes.to_vec()).unwrap();
    assert_eq!(codec::extract(&reloaded), message);
}

/// 验证载荷区间横跨多个 IDAT 块：从第一个的数据起点到最后一个的数据终点
#[test]
fn png_payload_spans_first_to_last_idat() {
    let bytes = build_png(&[10, 20]);
    let image = RawImage::from_bytes(ImageFormat::Png, bytes).unwrap();

    // 41 = 签名 8 + IHDR 块 25 + 块头 8；83 = 41 + 10 + 4 + 8 + 20
    assert_eq!(image.payload_range(), 41..83);

    // 两个数据区共 30 字节，夹着 12 字节块结构：42 个载荷字节承载 42 位，
    // 去掉 32 位前缀后恰好容纳一个消息字节
    let span = image.payload_range().len();
    assert_eq!(span, 30 + 12);
    assert!(codec::fits(span, 1));
    assert!(!codec::fits(span, 2));
}

/// 验证格式判定只认小写的 .png / .bmp 扩展名
#[test]
fn format_detection_by_extension() {
    use std::path::Path;

    assert_eq!(
        ImageFormat::from_path(Path::new("x.png")).unwrap(),
        ImageFormat::Png
    );
    assert_eq!(
        ImageFormat::from_path(Path::new("x.bmp")).unwrap(),
        ImageFormat::Bmp
    );
    assert!(matches!(
        ImageFormat::from_path(Path::new("x.gif")),
        Err(StegoError::UnsupportedFormat(ext)) if ext == "gif"
    ));
}

/// 验证损坏容器在构造阶段被拒绝
#[test]
fn malformed_containers_are_rejected_at_load() {
    // 没有任何 IDAT 块的 PNG
    let no_idat = build_png(&[]);
    assert!(matches!(
        RawImage::from_bytes(ImageFormat::Png, no_idat),
        Err(StegoError::MalformedContainer("IDAT not found"))
    ));

    // 被截断的 PNG：最后一个块的数据越过文件末尾
    let mut truncated = build_png(&[100]);
    truncated.truncate(truncated.len() - 10);
    assert!(matches!(
        RawImage::from_bytes(ImageFormat::Png, truncated),
        Err(StegoError::MalformedContainer(_))
    ));

    // bfOffBits 指向文件之外的 BMP
    let mut bad_offset = build_bmp(32);
    LittleEndian::write_u32(&mut bad_offset[10..14], 100_000);
    assert!(matches!(
        RawImage::from_bytes(ImageFormat::Bmp, bad_offset),
        Err(StegoError::MalformedContainer(_))
    ));

    // 短于头部的 BMP
    assert!(matches!(
        RawImage::from_bytes(ImageFormat::Bmp, vec![0u8; 20]),
        Err(StegoError::MalformedContainer(_))
    ));
}

/// 验证对从未嵌入过消息的图像提取不会越界或过度分配
#[test]
fn extract_from_pristine_image_is_bounded() {
    let image = RawImage::from_bytes(ImageFormat::Bmp, build_bmp(320)).unwrap();

    // 图案字节的最低位会拼出一个无意义的长度前缀；
    // 无论它声明多长，输出都不能超过载荷区间能容纳的字节数
    let garbage = codec::extract(&image);
    assert!(garbage.len() <= (image.payload_range().len() - 32) / 8);
}

/// 验证 CRC-32 引擎的标准校验向量
#[test]
fn crc32_known_vector() {
    let crc = Crc32::new();
    assert_eq!(crc.checksum(b"123456789"), 0xCBF4_3926);
    assert_eq!(crc.checksum(b""), 0);
}
