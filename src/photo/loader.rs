//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 原图加载在“尽可能早”的阶段执行输入校验，尽快失败：
//! 存在性 → 文件体积 → 文件签名 → 完整解码。
//! 解码失败等外部错误原样带出，不做掩盖。

use std::path::Path;

use super::source::SourceImage;
use super::{PhotoError, PhotoRenderer};

impl PhotoRenderer {
    /// 从本地路径加载原图，并按配置执行缩放策略。
    pub fn load_source(&self, path: impl AsRef<Path>) -> Result<SourceImage, PhotoError> {
        let path = path.as_ref();
        log::info!("📁 开始读取原图 - 路径: {}", path.display());

        if !path.exists() {
            return Err(PhotoError::FileSystem(format!("文件不存在：{}", path.display())));
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| PhotoError::FileSystem(format!("无法读取文件信息：{}", e)))?;

        let max_file_size = self.config.max_file_size();
        if metadata.len() > max_file_size {
            return Err(PhotoError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                metadata.len() as f64 / 1024.0 / 1024.0,
                max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        let bytes = std::fs::read(path)
            .map_err(|e| PhotoError::FileSystem(format!("无法读取图片文件：{}", e)))?;

        self.load_source_from_memory(&bytes)
    }

    /// 从内存字节加载原图。
    pub fn load_source_from_memory(&self, bytes: &[u8]) -> Result<SourceImage, PhotoError> {
        Self::validate_image_signature(bytes)?;

        let decoded = image::load_from_memory(bytes)
            .map_err(|e| PhotoError::Decode(format!("图片解码失败：{}", e)))?;

        self.prepare_source(decoded)
    }

    fn validate_image_signature(bytes: &[u8]) -> Result<(), PhotoError> {
        if bytes.is_empty() {
            return Err(PhotoError::InvalidFormat("图片内容为空".to_string()));
        }

        let kind = infer::get(bytes)
            .ok_or_else(|| PhotoError::InvalidFormat("无法识别图片类型".to_string()))?;

        if kind.matcher_type() != infer::MatcherType::Image {
            return Err(PhotoError::InvalidFormat(format!(
                "文件签名不是图片类型：{}",
                kind.mime_type()
            )));
        }

        Ok(())
    }
}
