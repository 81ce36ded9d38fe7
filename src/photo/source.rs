//! # 数据模型
//!
//! ## 设计思路
//!
//! 将“流水线输入”和“中间结果”解耦：
//! - `SourceImage` 表示已解码（并按需缩放）的原图，加载后不可变
//! - `PixelRecord` 表示单个像素的颜色、文字与渲染好的瓦片
//! - `PixelGrid` 以行优先的扁平数组存放按坐标索引的数据

use image::{Rgb, RgbImage};

use super::style::Payload;

/// 瓦片尺寸（像素）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSize {
    pub width: u32,
    pub height: u32,
}

impl TileSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// 已加载的原图。
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub(crate) pixels: RgbImage,
    /// 缩放前的原始尺寸（用于日志与诊断）。
    pub(crate) original_dimensions: (u32, u32),
}

impl SourceImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn original_dimensions(&self) -> (u32, u32) {
        self.original_dimensions
    }

    /// 读取像素颜色；越界返回 `None`。
    pub fn rgb_at(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        self.pixels.get_pixel_checked(x, y).copied()
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }
}

/// 单个像素的处理结果。
#[derive(Debug, Clone)]
pub struct PixelRecord {
    pub coordinate: (u32, u32),
    pub rgb: Rgb<u8>,
    pub payload: Payload,
    pub tile: RgbImage,
}

/// 行优先的二维网格。
#[derive(Debug, Clone)]
pub struct PixelGrid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

impl<T> PixelGrid<T> {
    /// 按坐标逐个生成单元格，生成顺序为行优先。
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> T) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize)
    }

    /// 行优先遍历，附带坐标。
    pub fn iter(&self) -> impl Iterator<Item = ((u32, u32), &T)> {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (((i as u32) % width, (i as u32) / width), cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_indexes_by_coordinate() {
        let grid = PixelGrid::from_fn(3, 2, |x, y| (x, y));
        assert_eq!(grid.len(), 6);
        assert_eq!(grid.get(2, 1), Some(&(2, 1)));
        assert_eq!(grid.get(0, 1), Some(&(0, 1)));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    fn grid_iter_yields_matching_coordinates() {
        let grid = PixelGrid::from_fn(4, 3, |x, y| x * 10 + y);
        for ((x, y), value) in grid.iter() {
            assert_eq!(*value, x * 10 + y);
        }
        assert_eq!(grid.iter().count(), 12);
    }
}
