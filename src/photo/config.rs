//! # 配置模块
//!
//! ## 设计思路
//!
//! 配置分两层：
//! - `PhotoOptions`：外部输入面（CLI / JSON 设置文件），字段为原始字符串与数值，不做校验
//! - `PhotoConfig`：校验通过后的不可变配置，流水线只认这一层
//!
//! ## 实现思路
//!
//! - `PhotoConfig::try_from(PhotoOptions)` 一次性校验全部字段，失败即返回，不产生半成品。
//! - 运行期调整通过 `with_*` 生成新配置；校验失败时原配置保持不变。
//! - `Default` 提供可直接使用的十六进制变体配置。

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use super::color::ColorMode;
use super::source::TileSize;
use super::style::{DEFAULT_TEXT, PhotoVariant};
use super::PhotoError;

/// 超过该边长即触发缩放。
pub const DEFAULT_MAX_DIMENSION: u32 = 256;
pub const DEFAULT_FONT_SIZE: f32 = 10.0;
pub const DEFAULT_TINT_FACTOR: f64 = 0.25;
pub const DEFAULT_SHADE_FACTOR: f64 = 0.25;
/// 输出画布允许占用的最大内存（RGB8 字节），默认 1 GiB。
pub const DEFAULT_MAX_OUTPUT_BYTES: u64 = 1024 * 1024 * 1024;

/// 未校验的原始配置。
///
/// 缺省字段在反序列化时取默认值，便于设置文件只写需要覆盖的项。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoOptions {
    pub variant: String,
    /// `None` 时使用变体默认瓦片尺寸。
    pub scale: Option<(u32, u32)>,
    /// `None` 时使用内置点阵字体。
    pub font: Option<PathBuf>,
    pub font_size: f32,
    pub text: String,
    pub background_mode: String,
    pub text_color_mode: String,
    pub tint_factor: f64,
    pub shade_factor: f64,
    pub resize: bool,
    pub max_dimension: u32,
    pub resize_filter: String,
    /// 读取原图时允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 输出画布允许的最大字节数（宽 × 高 × 3）。
    pub max_output_bytes: u64,
    pub parallel: bool,
}

impl Default for PhotoOptions {
    fn default() -> Self {
        Self {
            variant: PhotoVariant::Hex.as_str().to_string(),
            scale: None,
            font: None,
            font_size: DEFAULT_FONT_SIZE,
            text: DEFAULT_TEXT.to_string(),
            background_mode: ColorMode::Default.as_str().to_string(),
            text_color_mode: ColorMode::Default.as_str().to_string(),
            tint_factor: DEFAULT_TINT_FACTOR,
            shade_factor: DEFAULT_SHADE_FACTOR,
            resize: true,
            max_dimension: DEFAULT_MAX_DIMENSION,
            resize_filter: "triangle".to_string(),
            max_file_size: 50 * 1024 * 1024,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            parallel: true,
        }
    }
}

/// 校验后的运行配置。
#[derive(Debug, Clone)]
pub struct PhotoConfig {
    variant: PhotoVariant,
    scale: TileSize,
    font: Option<PathBuf>,
    font_size: f32,
    text: String,
    background_mode: ColorMode,
    text_color_mode: ColorMode,
    tint_factor: f64,
    shade_factor: f64,
    resize: bool,
    max_dimension: u32,
    resize_filter: FilterType,
    max_file_size: u64,
    max_output_bytes: u64,
    parallel: bool,
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            variant: PhotoVariant::Hex,
            scale: PhotoVariant::Hex.default_scale(),
            font: None,
            font_size: DEFAULT_FONT_SIZE,
            text: DEFAULT_TEXT.to_string(),
            background_mode: ColorMode::Default,
            text_color_mode: ColorMode::Default,
            tint_factor: DEFAULT_TINT_FACTOR,
            shade_factor: DEFAULT_SHADE_FACTOR,
            resize: true,
            max_dimension: DEFAULT_MAX_DIMENSION,
            resize_filter: FilterType::Triangle,
            max_file_size: 50 * 1024 * 1024,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            parallel: true,
        }
    }
}

impl TryFrom<PhotoOptions> for PhotoConfig {
    type Error = PhotoError;

    fn try_from(options: PhotoOptions) -> Result<Self, Self::Error> {
        let variant = PhotoVariant::parse(&options.variant)?;
        let scale = match options.scale {
            Some((width, height)) => validate_scale(width, height)?,
            None => variant.default_scale(),
        };

        if !options.font_size.is_finite() || options.font_size <= 0.0 {
            return Err(PhotoError::invalid("font_size", "大于 0 的数值"));
        }
        if variant == PhotoVariant::Text && options.text.is_empty() {
            return Err(PhotoError::invalid("text", "非空字符串"));
        }
        if options.max_dimension == 0 {
            return Err(PhotoError::invalid("max_dimension", "大于 0 的整数"));
        }
        if options.max_output_bytes == 0 {
            return Err(PhotoError::invalid("max_output_bytes", "大于 0 的整数"));
        }

        Ok(Self {
            variant,
            scale,
            font: options.font,
            font_size: options.font_size,
            text: options.text,
            background_mode: ColorMode::parse("background_mode", &options.background_mode)?,
            text_color_mode: ColorMode::parse("text_color_mode", &options.text_color_mode)?,
            tint_factor: validate_factor("tint_factor", options.tint_factor)?,
            shade_factor: validate_factor("shade_factor", options.shade_factor)?,
            resize: options.resize,
            max_dimension: options.max_dimension,
            resize_filter: parse_filter(&options.resize_filter)?,
            max_file_size: options.max_file_size,
            max_output_bytes: options.max_output_bytes,
            parallel: options.parallel,
        })
    }
}

fn validate_factor(field: &'static str, value: f64) -> Result<f64, PhotoError> {
    // NaN 不在区间内，会被一并拒绝
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(PhotoError::invalid(field, format!("0~1 之间的数值（当前：{}）", value)))
    }
}

fn validate_scale(width: u32, height: u32) -> Result<TileSize, PhotoError> {
    if width == 0 || height == 0 {
        return Err(PhotoError::invalid(
            "scale",
            format!("宽高均大于 0 的尺寸（当前：{}x{}）", width, height),
        ));
    }
    Ok(TileSize::new(width, height))
}

/// 解析缩放滤镜名。
pub(crate) fn parse_filter(name: &str) -> Result<FilterType, PhotoError> {
    match name.trim().to_lowercase().as_str() {
        "nearest" => Ok(FilterType::Nearest),
        "triangle" => Ok(FilterType::Triangle),
        "catmull-rom" | "catmullrom" => Ok(FilterType::CatmullRom),
        "gaussian" => Ok(FilterType::Gaussian),
        "lanczos3" => Ok(FilterType::Lanczos3),
        _ => Err(PhotoError::invalid(
            "resize_filter",
            "以下之一：nearest / triangle / catmull-rom / gaussian / lanczos3",
        )),
    }
}

impl PhotoConfig {
    pub fn variant(&self) -> PhotoVariant {
        self.variant
    }

    pub fn scale(&self) -> TileSize {
        self.scale
    }

    pub fn font(&self) -> Option<&Path> {
        self.font.as_deref()
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn background_mode(&self) -> ColorMode {
        self.background_mode
    }

    pub fn text_color_mode(&self) -> ColorMode {
        self.text_color_mode
    }

    pub fn tint_factor(&self) -> f64 {
        self.tint_factor
    }

    pub fn shade_factor(&self) -> f64 {
        self.shade_factor
    }

    pub fn resize(&self) -> bool {
        self.resize
    }

    pub fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    pub fn resize_filter(&self) -> FilterType {
        self.resize_filter
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    pub fn max_output_bytes(&self) -> u64 {
        self.max_output_bytes
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// 生成新的提亮系数配置。
    ///
    /// # 示例
    /// ```rust
    /// use binary_photo::photo::PhotoConfig;
    ///
    /// let config = PhotoConfig::default();
    /// assert!(config.with_tint_factor(1.25).is_err());
    /// assert_eq!(config.with_tint_factor(0.5)?.tint_factor(), 0.5);
    /// # Ok::<(), binary_photo::photo::PhotoError>(())
    /// ```
    pub fn with_tint_factor(&self, factor: f64) -> Result<Self, PhotoError> {
        let tint_factor = validate_factor("tint_factor", factor)?;
        Ok(Self {
            tint_factor,
            ..self.clone()
        })
    }

    pub fn with_shade_factor(&self, factor: f64) -> Result<Self, PhotoError> {
        let shade_factor = validate_factor("shade_factor", factor)?;
        Ok(Self {
            shade_factor,
            ..self.clone()
        })
    }

    pub fn with_background_mode(&self, mode: &str) -> Result<Self, PhotoError> {
        let background_mode = ColorMode::parse("background_mode", mode)?;
        Ok(Self {
            background_mode,
            ..self.clone()
        })
    }

    pub fn with_text_color_mode(&self, mode: &str) -> Result<Self, PhotoError> {
        let text_color_mode = ColorMode::parse("text_color_mode", mode)?;
        Ok(Self {
            text_color_mode,
            ..self.clone()
        })
    }

    pub fn with_resize(&self, resize: bool) -> Self {
        Self {
            resize,
            ..self.clone()
        }
    }

    pub fn with_parallel(&self, parallel: bool) -> Self {
        Self {
            parallel,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> PhotoOptions {
        PhotoOptions::default()
    }

    #[test]
    fn default_options_validate_to_default_config() {
        let config = PhotoConfig::try_from(options()).expect("defaults must be valid");
        assert_eq!(config.variant(), PhotoVariant::Hex);
        assert_eq!(config.scale(), PhotoVariant::Hex.default_scale());
        assert_eq!(config.background_mode(), ColorMode::Default);
        assert_eq!(config.max_dimension(), 256);
        assert!(config.resize());
    }

    #[test]
    fn accepts_every_color_mode() {
        for mode in ColorMode::ALL {
            let config = PhotoConfig::try_from(PhotoOptions {
                background_mode: mode.as_str().to_string(),
                text_color_mode: mode.as_str().to_string(),
                ..options()
            })
            .expect("valid mode");
            assert_eq!(config.background_mode(), mode);
            assert_eq!(config.text_color_mode(), mode);
        }
    }

    #[test]
    fn rejects_unknown_background_mode() {
        let err = PhotoConfig::try_from(PhotoOptions {
            background_mode: "Red".to_string(),
            ..options()
        })
        .unwrap_err();

        match err {
            PhotoError::InvalidConfiguration { field, expected } => {
                assert_eq!(field, "background_mode");
                assert!(expected.contains("default / tint / shade / negative"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_unknown_text_color_mode() {
        let err = PhotoConfig::try_from(PhotoOptions {
            text_color_mode: "Red".to_string(),
            ..options()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            PhotoError::InvalidConfiguration { field: "text_color_mode", .. }
        ));
    }

    #[test]
    fn rejects_out_of_range_factors() {
        for (tint, shade, field) in [
            (1.25, 0.25, "tint_factor"),
            (-0.1, 0.25, "tint_factor"),
            (0.25, 1.25, "shade_factor"),
            (0.25, f64::NAN, "shade_factor"),
        ] {
            let err = PhotoConfig::try_from(PhotoOptions {
                tint_factor: tint,
                shade_factor: shade,
                ..options()
            })
            .unwrap_err();
            match err {
                PhotoError::InvalidConfiguration { field: actual, .. } => assert_eq!(actual, field),
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn factor_bounds_are_inclusive() {
        let config = PhotoConfig::try_from(PhotoOptions {
            tint_factor: 0.0,
            shade_factor: 1.0,
            ..options()
        })
        .expect("bounds are valid");
        assert_eq!(config.tint_factor(), 0.0);
        assert_eq!(config.shade_factor(), 1.0);
    }

    #[test]
    fn rejects_zero_scale_and_empty_text() {
        let zero = PhotoConfig::try_from(PhotoOptions {
            scale: Some((0, 10)),
            ..options()
        });
        assert!(matches!(zero, Err(PhotoError::InvalidConfiguration { field: "scale", .. })));

        let empty = PhotoConfig::try_from(PhotoOptions {
            variant: "text".to_string(),
            text: String::new(),
            ..options()
        });
        assert!(matches!(empty, Err(PhotoError::InvalidConfiguration { field: "text", .. })));

        let no_budget = PhotoConfig::try_from(PhotoOptions {
            max_output_bytes: 0,
            ..options()
        });
        assert!(matches!(
            no_budget,
            Err(PhotoError::InvalidConfiguration { field: "max_output_bytes", .. })
        ));
    }

    #[test]
    fn explicit_scale_overrides_variant_default() {
        let config = PhotoConfig::try_from(PhotoOptions {
            variant: "binary".to_string(),
            scale: Some((12, 34)),
            ..options()
        })
        .unwrap();
        assert_eq!(config.scale(), TileSize::new(12, 34));
    }

    #[test]
    fn failed_reconfiguration_keeps_previous_values() {
        let config = PhotoConfig::default().with_shade_factor(0.5).unwrap();

        assert!(config.with_shade_factor(1.5).is_err());
        assert!(config.with_tint_factor(-1.0).is_err());
        assert!(config.with_background_mode("Red").is_err());
        assert!(config.with_text_color_mode("blue").is_err());

        assert_eq!(config.shade_factor(), 0.5);
        assert_eq!(config.tint_factor(), DEFAULT_TINT_FACTOR);
        assert_eq!(config.background_mode(), ColorMode::Default);

        let updated = config.with_background_mode("negative").unwrap();
        assert_eq!(updated.background_mode(), ColorMode::Negative);
        assert_eq!(config.background_mode(), ColorMode::Default);
    }

    #[test]
    fn options_deserialize_with_partial_keys() {
        let parsed: PhotoOptions =
            serde_json::from_str(r#"{ "variant": "binary", "tint_factor": 0.5 }"#).unwrap();
        assert_eq!(parsed.variant, "binary");
        assert_eq!(parsed.tint_factor, 0.5);
        assert_eq!(parsed.shade_factor, DEFAULT_SHADE_FACTOR);
        assert!(parsed.resize);
    }
}
