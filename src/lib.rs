//! # 像素文字图工具 — 库入口
//!
//! 把一张图片的每个像素替换成一小块“写着该像素颜色”的文字瓦片
//! （十六进制、三行二进制、方块二进制或任意固定文字），再拼回一张大图。
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  main.rs   CLI (clap) + 设置文件 (serde_json)             │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↓ PhotoOptions → PhotoConfig（校验）
//! ┌───────┼──────────────────────────────────────────────────┐
//! │  ┌─ error ────── AppError (统一错误类型)                  │
//! │  ├─ settings ─── JSON 设置文件读写                        │
//! │  └─ photo                                               │
//! │      ├─ loader / pipeline   加载·签名校验·缩放            │
//! │      ├─ style / tile / font 文字推导·瓦片渲染             │
//! │      ├─ compositor          瓦片拼接                      │
//! │      └─ writer              保存文件·写入剪贴板           │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 应用级错误类型 `AppError` |
//! | [`settings`] | `PhotoOptions` 的 JSON 设置文件读写 |
//! | [`photo`] | 像素文字图流水线 |
//!
//! ## 示例
//!
//! ```rust
//! use binary_photo::photo::{PhotoConfig, PhotoRenderer};
//! use image::{DynamicImage, RgbImage, Rgb};
//!
//! let renderer = PhotoRenderer::new(PhotoConfig::default())?;
//! let source = renderer.prepare_source(DynamicImage::ImageRgb8(
//!     RgbImage::from_pixel(2, 2, Rgb([255, 0, 0])),
//! ))?;
//! let output = renderer.render(&source)?;
//! let tile = renderer.config().scale();
//! assert_eq!(output.dimensions(), (2 * tile.width, 2 * tile.height));
//! # Ok::<(), binary_photo::photo::PhotoError>(())
//! ```

pub mod error;
pub mod photo;
pub mod settings;
