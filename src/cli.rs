//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::Parser;
use std::path::PathBuf;

/// 一款直接在 PNG / BMP 原始字节上工作的 LSB (最低有效位) 隐写工具，
/// 可把任意消息藏入图像的像素数据区域并无损恢复。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款直接在 PNG / BMP 原始字节上工作的 LSB (最低有效位) 隐写工具。\n嵌入只改动载荷区间内每个字节的最低位，并为 PNG 重新生成 IDAT 块的 CRC-32 校验和。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：embed (嵌入)、extract (提取)、check (容量检查) 和 info (元数据)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 把一条消息嵌入图像的像素数据区域。
    Embed(EmbedArgs),

    /// 从图像中提取先前嵌入的消息。
    Extract(ExtractArgs),

    /// 检查消息能否装入图像，不做任何改写。
    Check(CheckArgs),

    /// 展示图像的格式、尺寸、大小和修改时间。
    Info(InfoArgs),
}

/// 'embed' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct EmbedArgs {
    /// 作为载体的图像文件路径 (.png 或 .bmp)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的消息。包含空格时应使用引号。
    #[arg(short, long)]
    pub message: String,

    /// 结果图像的输出路径。缺省时原地覆盖输入文件。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,
}

/// 'extract' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// 已嵌入消息的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 把提取出的消息写入此文件。缺省时打印到标准输出。
    #[arg(short, long)]
    pub text: Option<PathBuf>,
}

/// 'check' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// 要检查的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 想要隐藏的消息。
    #[arg(short, long)]
    pub message: String,
}

/// 'info' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// 要查看的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,
}
