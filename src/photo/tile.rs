//! # 瓦片渲染模块
//!
//! ## 设计思路
//!
//! 每个像素独立生成一张固定尺寸的瓦片：
//! 1. 按着色模式解析背景色与文字色
//! 2. 以背景色填充新画布
//! 3. 由变体策略给出文字与每行位置，逐行绘制
//!
//! 渲染只读取不可变输入，不同像素之间没有共享可变状态，可安全并行。

use image::{Rgb, RgbImage};

use super::color::WHITE;
use super::font::GlyphPainter;
use super::source::{PixelRecord, TileSize};
use super::style::{Payload, TileStyle};
use super::{ColorMode, PhotoConfig};

/// 瓦片渲染器：持有字体、变体策略与着色参数。
pub struct TileRenderer {
    painter: GlyphPainter,
    style: Box<dyn TileStyle>,
    size: TileSize,
    background_mode: ColorMode,
    text_color_mode: ColorMode,
    tint_factor: f64,
    shade_factor: f64,
}

impl TileRenderer {
    pub fn new(config: &PhotoConfig, painter: GlyphPainter) -> Self {
        Self {
            painter,
            style: config.variant().style(config.text()),
            size: config.scale(),
            background_mode: config.background_mode(),
            text_color_mode: config.text_color_mode(),
            tint_factor: config.tint_factor(),
            shade_factor: config.shade_factor(),
        }
    }

    pub fn size(&self) -> TileSize {
        self.size
    }

    pub fn style(&self) -> &dyn TileStyle {
        self.style.as_ref()
    }

    /// 背景色：默认白色。
    pub fn background_color(&self, rgb: Rgb<u8>) -> Rgb<u8> {
        self.background_mode
            .apply(rgb, WHITE, self.tint_factor, self.shade_factor)
    }

    /// 文字色：默认像素原色。
    pub fn text_color(&self, rgb: Rgb<u8>) -> Rgb<u8> {
        self.text_color_mode
            .apply(rgb, rgb, self.tint_factor, self.shade_factor)
    }

    /// 将文字绘制到新瓦片上。
    pub fn render_tile(&self, rgb: Rgb<u8>, payload: &Payload) -> RgbImage {
        let mut tile = RgbImage::from_pixel(self.size.width, self.size.height, self.background_color(rgb));
        let text_color = self.text_color(rgb);

        for (index, line) in payload.lines().iter().enumerate() {
            let (x, y) = self.style.line_origin(index);
            self.painter.draw_line(&mut tile, text_color, x, y, line);
        }
        tile
    }

    /// 生成单个像素的完整记录。
    pub fn record(&self, coordinate: (u32, u32), rgb: Rgb<u8>) -> PixelRecord {
        let payload = self.style.payload(rgb);
        let tile = self.render_tile(rgb, &payload);
        PixelRecord {
            coordinate,
            rgb,
            payload,
            tile,
        }
    }
}
