//! # 颜色变换模块
//!
//! ## 设计思路
//!
//! 所有颜色计算均为纯函数，输入输出都是 `image::Rgb<u8>`，便于单独测试。
//! 系数校验在配置阶段完成（见 `config.rs`），此处假设 `factor ∈ [0, 1]`。
//!
//! - `shade`：向黑色加深，`floor(c * (1 - f))`
//! - `tint`：向白色提亮，`floor(c + (255 - c) * f)`
//! - `negative`：反色，`255 - c`

use image::{Pixel, Rgb};

use super::PhotoError;

/// 默认背景色。
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// 加深颜色（shade）。
///
/// # 示例
/// ```rust
/// use binary_photo::photo::shade;
/// use image::Rgb;
///
/// assert_eq!(shade(Rgb([255, 0, 0]), 0.25), Rgb([191, 0, 0]));
/// ```
pub fn shade(rgb: Rgb<u8>, factor: f64) -> Rgb<u8> {
    rgb.map(|c| to_channel(c as f64 * (1.0 - factor)))
}

/// 提亮颜色（tint）。
///
/// # 示例
/// ```rust
/// use binary_photo::photo::tint;
/// use image::Rgb;
///
/// assert_eq!(tint(Rgb([255, 0, 0]), 0.25), Rgb([255, 63, 63]));
/// ```
pub fn tint(rgb: Rgb<u8>, factor: f64) -> Rgb<u8> {
    rgb.map(|c| to_channel(c as f64 + (255.0 - c as f64) * factor))
}

/// 反色。
pub fn negative(rgb: Rgb<u8>) -> Rgb<u8> {
    rgb.map(|c| 255 - c)
}

/// 输出小写 `#rrggbb`。
pub fn to_hex(rgb: Rgb<u8>) -> String {
    let [r, g, b] = rgb.0;
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// 输出 8 位二进制字符串（高位在前）。
pub fn to_binary8(channel: u8) -> String {
    format!("{:08b}", channel)
}

// 浮点误差可能让结果略微越界，这里统一截断。
fn to_channel(value: f64) -> u8 {
    value.floor().clamp(0.0, 255.0) as u8
}

/// 文字 / 背景的着色模式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// 背景为白色，文字为像素原色。
    #[default]
    Default,
    Tint,
    Shade,
    Negative,
}

impl ColorMode {
    pub const ALL: [ColorMode; 4] = [Self::Default, Self::Tint, Self::Shade, Self::Negative];

    /// 从外部字符串解析着色模式。
    ///
    /// `field` 仅用于错误信息，指明是哪一个配置项出错。
    ///
    /// # 示例
    /// ```rust
    /// use binary_photo::photo::ColorMode;
    ///
    /// let mode = ColorMode::parse("background_mode", "Shade")?;
    /// assert_eq!(mode, ColorMode::Shade);
    /// assert!(ColorMode::parse("background_mode", "Red").is_err());
    /// # Ok::<(), binary_photo::photo::PhotoError>(())
    /// ```
    pub fn parse(field: &'static str, value: &str) -> Result<Self, PhotoError> {
        match value.trim().to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "tint" => Ok(Self::Tint),
            "shade" => Ok(Self::Shade),
            "negative" => Ok(Self::Negative),
            _ => Err(PhotoError::invalid(field, Self::allowed())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Tint => "tint",
            Self::Shade => "shade",
            Self::Negative => "negative",
        }
    }

    /// 可选值列表，供错误信息与 CLI 帮助使用。
    pub fn allowed() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(|mode| mode.as_str()).collect();
        format!("以下之一：{}", names.join(" / "))
    }

    /// 按模式计算最终颜色。
    ///
    /// `Default` 模式返回 `fallback`：背景传入白色，文字传入像素原色。
    pub fn apply(self, rgb: Rgb<u8>, fallback: Rgb<u8>, tint_factor: f64, shade_factor: f64) -> Rgb<u8> {
        match self {
            Self::Default => fallback,
            Self::Tint => tint(rgb, tint_factor),
            Self::Shade => shade(rgb, shade_factor),
            Self::Negative => negative(rgb),
        }
    }
}
