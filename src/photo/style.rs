//! # 文字样式（变体策略）模块
//!
//! ## 设计思路
//!
//! 不同变体只在两件事上有差异：
//! 1. 如何从像素 RGB 推导出要显示的文字（payload）
//! 2. 每一行文字画在瓦片的哪个位置（layout）
//!
//! 因此抽象为 `TileStyle` trait，由 `PhotoVariant` 在配置阶段选出具体实现；
//! 渲染与拼接流程对变体无感知，新增变体只需新增一个实现。

use image::Rgb;

use super::color::{to_binary8, to_hex};
use super::source::TileSize;
use super::PhotoError;

/// 默认的文字模式内容。
pub const DEFAULT_TEXT: &str = "#";

const BOX_CHUNK_WIDTH: usize = 5;

/// 单个像素要绘制的文字，按行拆分。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    lines: Vec<String>,
}

impl Payload {
    pub fn single(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
        }
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// 变体策略：负责“推导文字 + 文字布局”。
pub trait TileStyle: Send + Sync {
    /// 变体名（用于日志与输出文件名）。
    fn name(&self) -> &'static str;

    fn payload(&self, rgb: Rgb<u8>) -> Payload;

    /// 第 `line` 行文字的左上角坐标（相对瓦片）。
    fn line_origin(&self, line: usize) -> (i32, i32);
}

/// 十六进制：单行 `#rrggbb`。
#[derive(Debug, Clone, Copy, Default)]
pub struct HexStyle;

impl TileStyle for HexStyle {
    fn name(&self) -> &'static str {
        "hex"
    }

    fn payload(&self, rgb: Rgb<u8>) -> Payload {
        Payload::single(to_hex(rgb))
    }

    fn line_origin(&self, _line: usize) -> (i32, i32) {
        (0, 7)
    }
}

/// 固定文字：所有像素显示同一段字符串。
#[derive(Debug, Clone)]
pub struct TextStyle {
    text: String,
}

impl TextStyle {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TileStyle for TextStyle {
    fn name(&self) -> &'static str {
        "text"
    }

    fn payload(&self, _rgb: Rgb<u8>) -> Payload {
        Payload::single(self.text.clone())
    }

    fn line_origin(&self, _line: usize) -> (i32, i32) {
        (0, 0)
    }
}

/// 三行二进制：R / G / B 各占一行。
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryStyle;

impl TileStyle for BinaryStyle {
    fn name(&self) -> &'static str {
        "binary"
    }

    fn payload(&self, rgb: Rgb<u8>) -> Payload {
        Payload::from_lines(rgb.0.iter().map(|&c| to_binary8(c)).collect())
    }

    fn line_origin(&self, line: usize) -> (i32, i32) {
        (0, line as i32 * 10)
    }
}

/// 方块二进制：24 位拼接后按 5 字符切成 5 行（末行 4 字符），整体右移 8 像素。
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxBinaryStyle;

impl TileStyle for BoxBinaryStyle {
    fn name(&self) -> &'static str {
        "box-binary"
    }

    fn payload(&self, rgb: Rgb<u8>) -> Payload {
        let bits: String = rgb.0.iter().map(|&c| to_binary8(c)).collect();
        let lines = bits
            .as_bytes()
            .chunks(BOX_CHUNK_WIDTH)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect();
        Payload::from_lines(lines)
    }

    fn line_origin(&self, line: usize) -> (i32, i32) {
        (8, line as i32 * 10)
    }
}

/// 变体选择。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhotoVariant {
    #[default]
    Hex,
    Text,
    Binary,
    BoxBinary,
}

impl PhotoVariant {
    pub const ALL: [PhotoVariant; 4] = [Self::Hex, Self::Text, Self::Binary, Self::BoxBinary];

    pub fn parse(value: &str) -> Result<Self, PhotoError> {
        match value.trim().to_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "text" => Ok(Self::Text),
            "binary" => Ok(Self::Binary),
            "box-binary" | "box_binary" | "box" => Ok(Self::BoxBinary),
            _ => {
                let names: Vec<&str> = Self::ALL.iter().map(|v| v.as_str()).collect();
                Err(PhotoError::invalid(
                    "variant",
                    format!("以下之一：{}", names.join(" / ")),
                ))
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Text => "text",
            Self::Binary => "binary",
            Self::BoxBinary => "box-binary",
        }
    }

    /// 各变体默认瓦片尺寸。
    ///
    /// 按内置点阵字体在默认字号下的字宽（8px）与行距（10px）给出，
    /// 保证最长一行完整落在瓦片内：`#rrggbb` 7 字、二进制 8 字、方块 8 + 5 字。
    pub fn default_scale(self) -> TileSize {
        match self {
            Self::Hex => TileSize::new(56, 24),
            Self::Text => TileSize::new(10, 10),
            Self::Binary => TileSize::new(64, 30),
            Self::BoxBinary => TileSize::new(48, 50),
        }
    }

    /// 构建对应策略；`text` 只在文字模式下使用。
    pub fn style(self, text: &str) -> Box<dyn TileStyle> {
        match self {
            Self::Hex => Box::new(HexStyle),
            Self::Text => Box::new(TextStyle::new(text)),
            Self::Binary => Box::new(BinaryStyle),
            Self::BoxBinary => Box::new(BoxBinaryStyle),
        }
    }
}
