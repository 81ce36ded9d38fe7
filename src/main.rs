//! # 像素文字图工具 — 命令行入口
//!
//! 本文件仅负责日志初始化、参数解析与配置合并。
//! 业务逻辑分布在 `photo` 子模块中，详见 `lib.rs` 架构文档。

use std::path::PathBuf;

use binary_photo::error::AppError;
use binary_photo::photo::{self, OutputTarget, PhotoConfig, PhotoOptions, PhotoRenderer};
use binary_photo::settings;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "binary-photo", version, about = "把图片渲染成由文字瓦片组成的像素画")]
struct Args {
    /// 输入图片路径
    input: PathBuf,
    /// 输出文件路径（默认写入当前目录，文件名带时间戳）
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// JSON 设置文件，命令行参数优先
    #[arg(long)]
    config: Option<PathBuf>,
    /// 将合并后的设置写入该 JSON 文件，便于下次通过 --config 复用
    #[arg(long)]
    save_config: Option<PathBuf>,
    /// 变体：hex / text / binary / box-binary
    #[arg(long)]
    variant: Option<String>,
    /// 瓦片尺寸，格式 WxH，例如 40x24
    #[arg(long, value_parser = parse_scale)]
    scale: Option<(u32, u32)>,
    /// TTF/OTF 字体路径（缺省使用内置点阵字体）
    #[arg(long)]
    font: Option<PathBuf>,
    #[arg(long)]
    font_size: Option<f32>,
    /// 文字模式下每个瓦片显示的内容
    #[arg(long)]
    text: Option<String>,
    /// 背景着色：default / tint / shade / negative
    #[arg(long)]
    background: Option<String>,
    /// 文字着色：default / tint / shade / negative
    #[arg(long)]
    text_color: Option<String>,
    #[arg(long)]
    tint: Option<f64>,
    #[arg(long)]
    shade: Option<f64>,
    /// 保持原图尺寸，不缩放到 256 以内
    #[arg(long, default_value_t = false)]
    no_resize: bool,
    #[arg(long)]
    max_dimension: Option<u32>,
    /// 输出画布内存上限（MB）
    #[arg(long)]
    max_output_mb: Option<u64>,
    /// 串行渲染（默认按行并行）
    #[arg(long, default_value_t = false)]
    sequential: bool,
    /// 同时复制到系统剪贴板
    #[arg(long, default_value_t = false)]
    clipboard: bool,
    #[arg(long, default_value_t = 3)]
    clipboard_retries: u32,
    #[arg(long, default_value_t = 100)]
    clipboard_retry_delay_ms: u64,
}

fn parse_scale(value: &str) -> Result<(u32, u32), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("瓦片尺寸格式应为 WxH：{}", value))?;
    let width = width.trim().parse().map_err(|e| format!("宽度无效：{}", e))?;
    let height = height.trim().parse().map_err(|e| format!("高度无效：{}", e))?;
    Ok((width, height))
}

/// 设置文件 → 命令行参数，逐层覆盖。
fn merge_options(args: &Args) -> Result<PhotoOptions, AppError> {
    let mut options = match &args.config {
        Some(path) => settings::load_settings(path)?,
        None => PhotoOptions::default(),
    };

    if let Some(variant) = &args.variant {
        options.variant = variant.clone();
    }
    if let Some(scale) = args.scale {
        options.scale = Some(scale);
    }
    if let Some(font) = &args.font {
        options.font = Some(font.clone());
    }
    if let Some(font_size) = args.font_size {
        options.font_size = font_size;
    }
    if let Some(text) = &args.text {
        options.text = text.clone();
    }
    if let Some(background) = &args.background {
        options.background_mode = background.clone();
    }
    if let Some(text_color) = &args.text_color {
        options.text_color_mode = text_color.clone();
    }
    if let Some(tint) = args.tint {
        options.tint_factor = tint;
    }
    if let Some(shade) = args.shade {
        options.shade_factor = shade;
    }
    if args.no_resize {
        options.resize = false;
    }
    if let Some(max_dimension) = args.max_dimension {
        options.max_dimension = max_dimension;
    }
    if let Some(max_output_mb) = args.max_output_mb {
        options.max_output_bytes = max_output_mb.saturating_mul(1024 * 1024);
    }
    if args.sequential {
        options.parallel = false;
    }

    Ok(options)
}

fn output_targets(args: &Args, config: &PhotoConfig) -> Vec<OutputTarget> {
    let file = args
        .output
        .clone()
        .unwrap_or_else(|| photo::default_output_path(".", config.variant()));
    let mut targets = vec![OutputTarget::File(file)];
    if args.clipboard {
        targets.push(OutputTarget::Clipboard);
    }
    targets
}

fn run(args: Args) -> Result<(), AppError> {
    let options = merge_options(&args)?;
    let config = PhotoConfig::try_from(options.clone())?;
    if let Some(path) = &args.save_config {
        settings::save_settings(path, &options)?;
        log::info!("📝 已保存设置文件: {}", path.display());
    }

    let targets = output_targets(&args, &config);
    let renderer = PhotoRenderer::new(config)?;

    let output = renderer.render_path(&args.input)?;

    for target in targets {
        match target {
            OutputTarget::File(path) => {
                let saved = photo::save_output(&output, &path)?;
                println!("{}", saved.display());
            }
            OutputTarget::Clipboard => {
                photo::copy_to_clipboard(&output, args.clipboard_retries, args.clipboard_retry_delay_ms)?;
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        log::error!("运行失败: {err}");
        eprintln!("错误: {err}");
        std::process::exit(err.exit_code());
    }
}
