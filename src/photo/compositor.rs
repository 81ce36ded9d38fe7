//! # 拼接模块
//!
//! 将每个像素的瓦片按 `(x * tw, y * th)` 贴到输出画布上，无重叠、无空隙。
//! 画布尺寸固定为 `(W * tw, H * th)`，分配前检查边长溢出与内存上限（RGB8 字节数）。

use image::RgbImage;

use super::source::{PixelGrid, PixelRecord, TileSize};
use super::PhotoError;

/// 输出画布拼接器。
#[derive(Debug)]
pub struct Compositor {
    canvas: RgbImage,
    grid: (u32, u32),
    tile: TileSize,
}

impl Compositor {
    /// 按网格与瓦片尺寸分配画布；超过 `max_bytes` 时不分配，直接返回 `ResourceLimit`。
    pub fn new(
        grid_width: u32,
        grid_height: u32,
        tile: TileSize,
        max_bytes: u64,
    ) -> Result<Self, PhotoError> {
        let (width, height) = Self::output_dimensions(grid_width, grid_height, tile, max_bytes)?;
        Ok(Self {
            canvas: RgbImage::new(width, height),
            grid: (grid_width, grid_height),
            tile,
        })
    }

    /// 计算输出画布尺寸，并校验其字节数不超过 `max_bytes`。
    pub fn output_dimensions(
        grid_width: u32,
        grid_height: u32,
        tile: TileSize,
        max_bytes: u64,
    ) -> Result<(u32, u32), PhotoError> {
        let (Some(width), Some(height)) = (
            grid_width.checked_mul(tile.width),
            grid_height.checked_mul(tile.height),
        ) else {
            return Err(PhotoError::ResourceLimit(format!(
                "输出画布尺寸溢出：{}x{} 像素 × {}x{} 瓦片",
                grid_width, grid_height, tile.width, tile.height
            )));
        };

        let bytes = (width as u64)
            .checked_mul(height as u64)
            .and_then(|pixels| pixels.checked_mul(3));
        match bytes {
            Some(bytes) if bytes <= max_bytes => Ok((width, height)),
            _ => Err(PhotoError::ResourceLimit(format!(
                "输出画布过大：{}x{} 需要 {:.1} MB，上限 {:.1} MB",
                width,
                height,
                width as f64 * height as f64 * 3.0 / 1024.0 / 1024.0,
                max_bytes as f64 / 1024.0 / 1024.0
            ))),
        }
    }

    /// 将坐标 `(x, y)` 的瓦片贴入画布。
    pub fn paste(&mut self, x: u32, y: u32, tile: &RgbImage) -> Result<(), PhotoError> {
        if x >= self.grid.0 || y >= self.grid.1 {
            return Err(PhotoError::Compose(format!(
                "坐标越界：({}, {})，网格 {}x{}",
                x, y, self.grid.0, self.grid.1
            )));
        }
        if tile.dimensions() != (self.tile.width, self.tile.height) {
            return Err(PhotoError::Compose(format!(
                "瓦片尺寸不一致：{}x{}（期望 {}x{}）",
                tile.width(),
                tile.height(),
                self.tile.width,
                self.tile.height
            )));
        }

        image::imageops::replace(
            &mut self.canvas,
            tile,
            x as i64 * self.tile.width as i64,
            y as i64 * self.tile.height as i64,
        );
        Ok(())
    }

    pub fn finish(self) -> RgbImage {
        self.canvas
    }

    /// 一次性拼接完整的像素记录网格。
    pub fn compose(
        records: &PixelGrid<PixelRecord>,
        tile: TileSize,
        max_bytes: u64,
    ) -> Result<RgbImage, PhotoError> {
        let mut compositor = Self::new(records.width(), records.height(), tile, max_bytes)?;
        for ((x, y), record) in records.iter() {
            compositor.paste(x, y, &record.tile)?;
        }
        Ok(compositor.finish())
    }
}
