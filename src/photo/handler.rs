//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `PhotoRenderer` 只负责流程编排，处理链路固定为：
//! 1. 加载原图并执行缩放策略（`loader` / `pipeline`）
//! 2. 逐像素推导文字、渲染瓦片（`tile`）
//! 3. 拼接为输出画布（`compositor`）
//!
//! ## 实现思路
//!
//! - 字体与变体策略在构建时准备一次，之后只读共享。
//! - 按行渲染并立即拼接，同一时刻只保留一行瓦片，避免整图瓦片常驻内存。
//! - `parallel` 开启时用 `rayon` 并行渲染每一行；贴图顺序固定，结果与串行逐字节一致。
//! - 记录 `load/render/total` 阶段耗时，便于性能诊断。

use std::path::Path;
use std::time::Instant;

use image::RgbImage;
use rayon::prelude::*;

use super::compositor::Compositor;
use super::font::GlyphPainter;
use super::source::{PixelGrid, PixelRecord, SourceImage};
use super::tile::TileRenderer;
use super::{PhotoConfig, PhotoError};

/// 像素文字图渲染器。
pub struct PhotoRenderer {
    pub(super) config: PhotoConfig,
    pub(super) tiles: TileRenderer,
}

impl PhotoRenderer {
    /// 根据校验后的配置创建渲染器，同时加载字体。
    ///
    /// # 示例
    /// ```rust
    /// use binary_photo::photo::{PhotoConfig, PhotoRenderer};
    ///
    /// let renderer = PhotoRenderer::new(PhotoConfig::default())?;
    /// assert_eq!(renderer.config().max_dimension(), 256);
    /// # Ok::<(), binary_photo::photo::PhotoError>(())
    /// ```
    pub fn new(config: PhotoConfig) -> Result<Self, PhotoError> {
        let painter = GlyphPainter::load(config.font(), config.font_size())?;
        let tiles = TileRenderer::new(&config, painter);

        log::debug!(
            "⚙️ 渲染器就绪：variant={} scale={}x{} background={} text={} tint={} shade={}",
            config.variant().as_str(),
            config.scale().width,
            config.scale().height,
            config.background_mode().as_str(),
            config.text_color_mode().as_str(),
            config.tint_factor(),
            config.shade_factor()
        );

        Ok(Self { config, tiles })
    }

    pub fn config(&self) -> &PhotoConfig {
        &self.config
    }

    /// 单个坐标的像素记录；越界返回 `None`。
    pub fn pixel_record(&self, source: &SourceImage, x: u32, y: u32) -> Option<PixelRecord> {
        source
            .rgb_at(x, y)
            .map(|rgb| self.tiles.record((x, y), rgb))
    }

    /// 生成覆盖整张原图的像素记录网格。
    pub fn pixel_records(&self, source: &SourceImage) -> PixelGrid<PixelRecord> {
        let (width, height) = source.dimensions();
        PixelGrid::from_fn(width, height, |x, y| {
            self.tiles.record((x, y), *source.pixels.get_pixel(x, y))
        })
    }

    /// 渲染并拼接输出画布。
    pub fn render(&self, source: &SourceImage) -> Result<RgbImage, PhotoError> {
        let (width, height) = source.dimensions();
        let mut compositor = Compositor::new(
            width,
            height,
            self.tiles.size(),
            self.config.max_output_bytes(),
        )?;

        for y in 0..height {
            let row = self.render_row(source, y);
            for record in &row {
                compositor.paste(record.coordinate.0, record.coordinate.1, &record.tile)?;
            }
            log::trace!("第 {}/{} 行已拼接", y + 1, height);
        }

        Ok(compositor.finish())
    }

    fn render_row(&self, source: &SourceImage, y: u32) -> Vec<PixelRecord> {
        let width = source.width();
        let make = |x: u32| self.tiles.record((x, y), *source.pixels.get_pixel(x, y));

        if self.config.parallel() {
            (0..width).into_par_iter().map(make).collect()
        } else {
            (0..width).map(make).collect()
        }
    }

    /// 处理主入口：从文件加载并渲染。
    pub fn render_path(&self, path: impl AsRef<Path>) -> Result<RgbImage, PhotoError> {
        let total_start = Instant::now();

        let load_start = Instant::now();
        let source = self.load_source(path)?;
        let load_elapsed = load_start.elapsed();

        let render_start = Instant::now();
        let output = self.render(&source)?;
        let render_elapsed = render_start.elapsed();

        log::info!(
            "✅ 像素文字图完成 - variant={} 输入={}x{} 输出={}x{} load={}ms render={}ms total={}ms",
            self.tiles.style().name(),
            source.width(),
            source.height(),
            output.width(),
            output.height(),
            load_elapsed.as_millis(),
            render_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo::{PhotoOptions, PhotoVariant};
    use image::{DynamicImage, ImageBuffer, Rgb};

    fn source(renderer: &PhotoRenderer, width: u32, height: u32) -> SourceImage {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x * 40) as u8, (y * 60) as u8, ((x + y) * 20) as u8])
        });
        renderer
            .prepare_source(DynamicImage::ImageRgb8(img))
            .expect("prepare should succeed")
    }

    fn renderer_for(variant: PhotoVariant) -> PhotoRenderer {
        let config = PhotoConfig::try_from(PhotoOptions {
            variant: variant.as_str().to_string(),
            ..Default::default()
        })
        .unwrap();
        PhotoRenderer::new(config).unwrap()
    }

    #[test]
    fn output_size_matches_grid_for_every_variant() {
        for variant in PhotoVariant::ALL {
            let renderer = renderer_for(variant);
            let src = source(&renderer, 3, 2);
            let tile = renderer.config().scale();
            let output = renderer.render(&src).unwrap();
            assert_eq!(output.dimensions(), (3 * tile.width, 2 * tile.height));
        }
    }

    #[test]
    fn composed_output_matches_individual_tiles() {
        let renderer = renderer_for(PhotoVariant::Binary);
        let src = source(&renderer, 4, 3);
        let tile = renderer.config().scale();
        let output = renderer.render(&src).unwrap();

        let records = renderer.pixel_records(&src);
        assert_eq!(records.len(), 12);
        let composed = Compositor::compose(&records, tile, renderer.config().max_output_bytes()).unwrap();
        assert_eq!(output, composed);

        let record = renderer.pixel_record(&src, 2, 1).unwrap();
        let view = image::imageops::crop_imm(&output, 2 * tile.width, tile.height, tile.width, tile.height)
            .to_image();
        assert_eq!(view, record.tile);
    }

    #[test]
    fn pixel_records_cover_exact_source_grid() {
        let renderer = renderer_for(PhotoVariant::Hex);
        let src = source(&renderer, 5, 2);
        let records = renderer.pixel_records(&src);
        assert_eq!((records.width(), records.height()), (5, 2));
        for ((x, y), record) in records.iter() {
            assert_eq!(record.coordinate, (x, y));
            assert_eq!(Some(record.rgb), src.rgb_at(x, y));
        }
        assert!(renderer.pixel_record(&src, 5, 0).is_none());
    }

    #[test]
    fn rendering_is_idempotent_and_parallel_matches_sequential() {
        let parallel = renderer_for(PhotoVariant::BoxBinary);
        let sequential = PhotoRenderer::new(parallel.config().with_parallel(false)).unwrap();
        let src = source(&parallel, 6, 4);

        let first = parallel.render(&src).unwrap();
        let second = parallel.render(&src).unwrap();
        let serial = sequential.render(&src).unwrap();

        assert_eq!(first.as_raw(), second.as_raw());
        assert_eq!(first.as_raw(), serial.as_raw());
    }

    #[test]
    fn huge_tiles_fail_with_resource_limit() {
        let config = PhotoConfig::try_from(PhotoOptions {
            scale: Some((2000, 2000)),
            ..Default::default()
        })
        .unwrap();
        let renderer = PhotoRenderer::new(config).unwrap();
        let src = source(&renderer, 256, 256);
        assert!(matches!(renderer.render(&src), Err(PhotoError::ResourceLimit(_))));
    }

    #[test]
    fn missing_font_fails_construction() {
        let result = PhotoConfig::try_from(PhotoOptions {
            font: Some("/no/such/font.ttf".into()),
            ..Default::default()
        })
        .map(PhotoRenderer::new);
        assert!(matches!(result, Ok(Err(PhotoError::Font(_)))));
    }
}
