//! # 字形绘制模块
//!
//! ## 设计思路
//!
//! 文字栅格化完全交给外部组件，本模块只负责“颜色 + 字号 + 文字 + 位置”：
//! - 配置了字体文件：`ab_glyph` 解析 TTF/OTF，`imageproc` 负责绘制
//! - 未配置字体：使用内置 `font8x8` 点阵字体，无需任何外部资源
//!
//! 字体在渲染器构建时加载一次，之后所有瓦片共享只读引用。

use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgb, RgbImage};

use super::PhotoError;

const BITMAP_GLYPH_SIZE: i32 = 8;

/// 字形绘制器。
pub enum GlyphPainter {
    /// 矢量字体（TTF/OTF）。
    Outline { font: FontVec, scale: PxScale },
    /// 内置 8x8 点阵字体，`scale` 为整数放大倍数。
    Bitmap { scale: i32 },
}

impl std::fmt::Debug for GlyphPainter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outline { scale, .. } => f
                .debug_struct("Outline")
                .field("scale", &(scale.x, scale.y))
                .finish(),
            Self::Bitmap { scale } => f.debug_struct("Bitmap").field("scale", scale).finish(),
        }
    }
}

impl GlyphPainter {
    /// 按配置加载字体；`path` 为空时使用内置点阵字体。
    pub fn load(path: Option<&Path>, font_size: f32) -> Result<Self, PhotoError> {
        match path {
            Some(path) => Self::from_file(path, font_size),
            None => Ok(Self::builtin(font_size)),
        }
    }

    pub fn builtin(font_size: f32) -> Self {
        let scale = ((font_size / BITMAP_GLYPH_SIZE as f32).round() as i32).max(1);
        Self::Bitmap { scale }
    }

    pub fn from_file(path: &Path, font_size: f32) -> Result<Self, PhotoError> {
        let bytes = std::fs::read(path)
            .map_err(|e| PhotoError::Font(format!("无法读取字体文件 {}：{}", path.display(), e)))?;
        let font = FontVec::try_from_vec(bytes)
            .map_err(|e| PhotoError::Font(format!("字体解析失败 {}：{}", path.display(), e)))?;

        log::info!("🔤 已加载字体：{}（字号 {}）", path.display(), font_size);

        Ok(Self::Outline {
            font,
            scale: PxScale::from(font_size),
        })
    }

    /// 在 `(x, y)` 处绘制单行文字，超出画布部分被裁剪。
    pub fn draw_line(&self, canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str) {
        match self {
            Self::Outline { font, scale } => {
                imageproc::drawing::draw_text_mut(canvas, color, x, y, *scale, font, text);
            }
            Self::Bitmap { scale } => draw_bitmap_line(canvas, color, x, y, *scale, text),
        }
    }
}

fn draw_bitmap_line(canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, scale: i32, text: &str) {
    let (width, height) = (canvas.width() as i32, canvas.height() as i32);
    let advance = BITMAP_GLYPH_SIZE * scale;
    let mut cursor_x = x;

    for ch in text.chars() {
        if cursor_x >= width {
            break;
        }
        let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
            cursor_x += advance;
            continue;
        };

        for (row_idx, &row_bits) in glyph.iter().enumerate() {
            for col_idx in 0..BITMAP_GLYPH_SIZE {
                if (row_bits >> col_idx) & 1 == 0 {
                    continue;
                }
                let px = cursor_x + col_idx * scale;
                let py = y + row_idx as i32 * scale;
                for sy in 0..scale {
                    for sx in 0..scale {
                        let (tx, ty) = (px + sx, py + sy);
                        if tx >= 0 && ty >= 0 && tx < width && ty < height {
                            canvas.put_pixel(tx as u32, ty as u32, color);
                        }
                    }
                }
            }
        }
        cursor_x += advance;
    }
}
