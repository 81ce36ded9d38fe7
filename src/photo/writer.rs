//! # 输出模块
//!
//! ## 设计思路
//!
//! 流水线只产出内存中的 `RgbImage`，落盘与写入剪贴板都在这里完成：
//! - 文件：按扩展名选择编码格式，未知扩展名回退 PNG
//! - 剪贴板：`arboard` 写入，失败时有限次指数退避重试
//!
//! 剪贴板可能被其他进程短暂占用，因此只有剪贴板写入带重试，其余失败立即返回。

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use image::{DynamicImage, ImageFormat, RgbImage};

use super::{PhotoError, PhotoVariant};

const CLIPBOARD_RETRY_MAX_DELAY_MS: u64 = 900;

/// 输出目标。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Clipboard,
}

/// 生成默认输出文件路径：`binary_photo_<变体>_<时间戳>.png`。
pub fn default_output_path(dir: impl AsRef<Path>, variant: PhotoVariant) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d%H%M%S%f");
    dir.as_ref()
        .join(format!("binary_photo_{}_{}.png", variant.as_str(), timestamp))
}

/// 保存输出图片，必要时创建父目录。
pub fn save_output(image: &RgbImage, path: impl AsRef<Path>) -> Result<PathBuf, PhotoError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| PhotoError::FileSystem(format!("创建输出目录失败：{}", e)))?;
    }

    let format = ImageFormat::from_path(path)
        .ok()
        .filter(|format| format.writing_enabled())
        .unwrap_or(ImageFormat::Png);

    image
        .save_with_format(path, format)
        .map_err(|e| PhotoError::Encode(format!("保存输出图片失败（{:?}）：{}", format, e)))?;

    log::info!(
        "💾 已保存输出 - 路径: {} 尺寸: {}x{} 格式: {:?}",
        path.display(),
        image.width(),
        image.height(),
        format
    );

    Ok(path.to_path_buf())
}

/// 第 `attempt` 次重试前的等待时间（指数退避，带上限）。
fn backoff_delay_ms(base_delay_ms: u64, attempt: u32, max_delay_ms: u64) -> u64 {
    base_delay_ms
        .saturating_mul(1_u64 << attempt.saturating_sub(1).min(8))
        .min(max_delay_ms.max(base_delay_ms))
}

/// 将输出图片写入系统剪贴板（含重试）。
pub fn copy_to_clipboard(image: &RgbImage, retries: u32, retry_delay_ms: u64) -> Result<(), PhotoError> {
    let rgba = DynamicImage::ImageRgb8(image.clone()).into_rgba8();
    let (width, height) = rgba.dimensions();
    let bytes = rgba.into_raw();

    log::debug!("📋 准备复制到剪贴板 - {}x{}", width, height);

    let retry_count = retries.max(1);
    let mut last_error = None;

    for attempt in 1..=retry_count {
        if attempt > 1 {
            let wait_ms = backoff_delay_ms(retry_delay_ms.max(1), attempt - 1, CLIPBOARD_RETRY_MAX_DELAY_MS);
            log::debug!("🔄 重试 {}/{}，等待 {}ms", attempt, retry_count, wait_ms);
            std::thread::sleep(Duration::from_millis(wait_ms));
        }

        let result = arboard::Clipboard::new().and_then(|mut clipboard| {
            clipboard.set_image(arboard::ImageData {
                width: width as usize,
                height: height as usize,
                bytes: Cow::Borrowed(bytes.as_slice()),
            })
        });

        match result {
            Ok(()) => {
                log::info!("✅ 复制成功 (尝试 {})", attempt);
                return Ok(());
            }
            Err(err) => {
                log::warn!("❌ 尝试 {} 失败: {}", attempt, err);
                last_error = Some(err.to_string());
            }
        }
    }

    Err(PhotoError::Clipboard(
        last_error.unwrap_or_else(|| "未知错误".to_string()),
    ))
}
