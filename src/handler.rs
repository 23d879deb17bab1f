//! # 命令处理逻辑模块
//!
//! 包含处理四个子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心编解码器以及向用户报告结果。

use crate::cli::{CheckArgs, EmbedArgs, ExtractArgs, InfoArgs};
use crate::codec;
use crate::container::{self, RawImage};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use colored::Colorize;
use std::fs;

/// 处理 'embed' 命令的执行逻辑。
///
/// 负责加载图像、把消息嵌入载荷区间，并将结果写到目标路径
/// (缺省为原地覆盖输入文件)。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 图像无法读取、格式不受支持或容器结构损坏。
/// * 消息装不下 (此时输入文件保持原样)。
/// * 无法写入目标文件。
pub fn handle_embed(args: EmbedArgs) -> Result<()> {
    let mut image = RawImage::load(&args.image).with_context(|| {
        format!(
            "Unable to load image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    codec::embed(&mut image, args.message.as_bytes()).with_context(|| {
        format!(
            "Failed to embed the message into: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let dest = args.dest.unwrap_or_else(|| args.image.clone());
    image.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The message has been successfully embedded and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'extract' 命令的执行逻辑。
///
/// 从图像中读回嵌入的消息，打印到标准输出或写入指定文件。
/// 对从未嵌入过消息的图像调用会得到无意义的输出。
///
/// # Errors
///
/// 图像无法加载或目标文本文件无法写入时返回错误。
pub fn handle_extract(args: ExtractArgs) -> Result<()> {
    let image = RawImage::load(&args.image).with_context(|| {
        format!(
            "Unable to load image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let message = codec::extract(&image);

    match args.text {
        Some(path) => {
            fs::write(&path, &message).with_context(|| {
                format!(
                    "Unable to write to target text file: {}",
                    path.to_string_lossy().red().bold()
                )
            })?;

            println!(
                "The message has been successfully extracted and saved: {}",
                path.to_string_lossy().green().bold()
            );
        }
        None => {
            println!(
                "The secret message: {}",
                String::from_utf8_lossy(&message).green().bold()
            );
        }
    }

    Ok(())
}

/// 处理 'check' 命令的执行逻辑。
///
/// 只做容量判定并报告结果，不改写任何字节。
///
/// # Errors
///
/// 图像无法加载时返回错误。
pub fn handle_check(args: CheckArgs) -> Result<()> {
    let image = RawImage::load(&args.image).with_context(|| {
        format!(
            "Unable to load image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    if codec::fits(image.payload_range().len(), args.message.len()) {
        println!("The message {} fit inside the image", "can".green().bold());
    } else {
        println!(
            "The message {} fit inside the image",
            "cannot".red().bold()
        );
    }

    Ok(())
}

/// 处理 'info' 命令的执行逻辑。
///
/// 只读地展示格式、内存占用、尺寸和最后修改时间。
///
/// # Errors
///
/// 图像无法加载时返回错误。
pub fn handle_info(args: InfoArgs) -> Result<()> {
    let info = container::describe(&args.image).with_context(|| {
        format!(
            "Unable to load image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    println!("File format: {}", info.format.to_string().green().bold());
    println!(
        "Memory usage: {} (bytes)",
        info.size_bytes.to_string().green().bold()
    );
    println!(
        "Size: {}x{}",
        info.width.to_string().green().bold(),
        info.height.to_string().green().bold()
    );

    if let Some(modified) = info.last_modified {
        let formatted = DateTime::<Local>::from(modified).format("%Y-%m-%d %H:%M:%S");
        println!("Last modified: {}", formatted.to_string().green().bold());
    }

    Ok(())
}
