//! # 像素文字图模块（photo）
//!
//! ## 设计思路
//!
//! 该模块将“原图加载 → 逐像素推导文字 → 渲染瓦片 → 拼接 → 输出”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `handler`：`PhotoRenderer`，编排整条处理流水线
//! - `loader`：文件读取与签名校验
//! - `pipeline`：缩放策略（长边不超过 256）
//! - `color`：tint / shade / negative 与文字编码（hex / binary）
//! - `style`：变体策略（hex / text / binary / box-binary）
//! - `font`：字形绘制（矢量字体或内置点阵字体）
//! - `tile`：单像素瓦片渲染
//! - `compositor`：瓦片拼接
//! - `writer`：保存文件 / 写入剪贴板
//! - `config/error/source`：配置、错误、数据模型
//!
//! ## 新同事快速上手
//!
//! ```text
//! main.rs（CLI 参数 + 设置文件）
//!    ↓
//! PhotoConfig::try_from(PhotoOptions)（一次性校验）
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ loader.rs / pipeline.rs（加载 + 缩放）
//!    ├─ tile.rs（style.rs 推导文字 + font.rs 绘制）
//!    └─ compositor.rs（按坐标拼接）
//!    ↓
//! writer.rs（保存 / 剪贴板）
//! ```
//!
//! ## 分层职责建议
//!
//! - 新增变体优先改 `style.rs`（实现 `TileStyle` 并在 `PhotoVariant` 中登记）
//! - 配置项与校验规则优先改 `config.rs`
//! - 流程顺序变更优先改 `handler.rs`

mod color;
mod compositor;
mod config;
mod error;
mod font;
mod handler;
mod loader;
mod pipeline;
mod source;
mod style;
mod tile;
mod writer;

pub use color::{ColorMode, WHITE, negative, shade, tint, to_binary8, to_hex};
pub use compositor::Compositor;
pub use config::{
    DEFAULT_FONT_SIZE, DEFAULT_MAX_DIMENSION, DEFAULT_MAX_OUTPUT_BYTES, DEFAULT_SHADE_FACTOR,
    DEFAULT_TINT_FACTOR, PhotoConfig, PhotoOptions,
};
pub use error::PhotoError;
pub use font::GlyphPainter;
pub use handler::PhotoRenderer;
pub use source::{PixelGrid, PixelRecord, SourceImage, TileSize};
pub use style::{
    BinaryStyle, BoxBinaryStyle, DEFAULT_TEXT, HexStyle, Payload, PhotoVariant, TextStyle, TileStyle,
};
pub use tile::TileRenderer;
pub use writer::{OutputTarget, copy_to_clipboard, default_output_path, save_output};
