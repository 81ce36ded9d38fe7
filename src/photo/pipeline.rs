//! # 缩放策略模块
//!
//! ## 设计思路
//!
//! 原图任一边超过 `max_dimension`（默认 256）时按比例缩小，使长边恰好等于上限；
//! 关闭缩放时原样使用。策略只在加载时执行一次。
//!
//! ## 实现思路
//!
//! 1. 转换为 RGB8
//! 2. 计算保持宽高比的目标尺寸
//! 3. 优先使用 `fast_image_resize`，失败时回退 `image::imageops::resize`

use fast_image_resize as fr;
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};

use super::source::SourceImage;
use super::{PhotoError, PhotoRenderer};

impl PhotoRenderer {
    /// 对内存中的图片执行缩放策略，得到流水线输入。
    pub fn prepare_source(&self, image: DynamicImage) -> Result<SourceImage, PhotoError> {
        let rgb = image.into_rgb8();
        let original_dimensions = rgb.dimensions();

        let pixels = if self.config.resize() {
            self.maybe_downscale(rgb)?
        } else {
            rgb
        };

        log::info!(
            "✅ 原图就绪 - 原始尺寸: {}x{} 输入尺寸: {}x{}",
            original_dimensions.0,
            original_dimensions.1,
            pixels.width(),
            pixels.height()
        );

        Ok(SourceImage {
            pixels,
            original_dimensions,
        })
    }

    /// 计算缩放后的尺寸：不超过 `max_dimension` 且保持宽高比。
    ///
    /// # 示例
    /// ```rust
    /// use binary_photo::photo::PhotoRenderer;
    ///
    /// assert_eq!(PhotoRenderer::fit_within(640, 640, 256), (256, 256));
    /// assert_eq!(PhotoRenderer::fit_within(640, 320, 256), (256, 128));
    /// assert_eq!(PhotoRenderer::fit_within(100, 50, 256), (100, 50));
    /// ```
    pub fn fit_within(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
        if width <= max_dimension && height <= max_dimension {
            return (width, height);
        }

        let scale = (max_dimension as f64 / width as f64).min(max_dimension as f64 / height as f64);
        let target_width = ((width as f64 * scale).round() as u32).clamp(1, max_dimension);
        let target_height = ((height as f64 * scale).round() as u32).clamp(1, max_dimension);
        (target_width, target_height)
    }

    fn maybe_downscale(&self, image: RgbImage) -> Result<RgbImage, PhotoError> {
        let (width, height) = image.dimensions();
        let (target_width, target_height) =
            Self::fit_within(width, height, self.config.max_dimension());

        if (target_width, target_height) == (width, height) {
            return Ok(image);
        }

        let filter = self.config.resize_filter();
        log::info!(
            "🧩 缩放原图：{}x{} -> {}x{}（filter={:?}）",
            width,
            height,
            target_width,
            target_height,
            filter
        );

        match Self::resize_with_fast_image_resize(&image, target_width, target_height, filter) {
            Ok(resized) => Ok(resized),
            Err(err) => {
                log::warn!(
                    "⚠️ fast_image_resize 缩放失败，回退 image::imageops::resize：{}",
                    err
                );
                Ok(image::imageops::resize(&image, target_width, target_height, filter))
            }
        }
    }

    fn resize_with_fast_image_resize(
        image: &RgbImage,
        target_width: u32,
        target_height: u32,
        filter: FilterType,
    ) -> Result<RgbImage, PhotoError> {
        let (src_width, src_height) = image.dimensions();

        let src_image = fr::images::Image::from_vec_u8(
            src_width,
            src_height,
            image.as_raw().clone(),
            fr::PixelType::U8x3,
        )
        .map_err(|e| PhotoError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

        let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x3);

        let mut resizer = fr::Resizer::new();
        let options = fr::ResizeOptions::new()
            .resize_alg(fr::ResizeAlg::Convolution(Self::to_fast_filter(filter)));

        resizer
            .resize(&src_image, &mut dst_image, Some(&options))
            .map_err(|e| PhotoError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

        RgbImage::from_raw(target_width, target_height, dst_image.into_vec())
            .ok_or_else(|| PhotoError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))
    }

    fn to_fast_filter(filter: FilterType) -> fr::FilterType {
        match filter {
            FilterType::Nearest => fr::FilterType::Box,
            FilterType::Triangle => fr::FilterType::Bilinear,
            FilterType::CatmullRom => fr::FilterType::CatmullRom,
            FilterType::Gaussian => fr::FilterType::Mitchell,
            FilterType::Lanczos3 => fr::FilterType::Lanczos3,
        }
    }
}
