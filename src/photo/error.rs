//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载“加载 → 编码 → 渲染 → 拼接 → 输出”整条链路的错误来源。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//! 外部组件（解码、字体、剪贴板）的原始错误信息直接透传，不做掩盖。

/// 像素文字图统一错误类型。
#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    /// 配置非法：`field` 为出错字段，`expected` 描述允许的取值集合或范围。
    #[error("配置无效：{field} 必须是 {expected}")]
    InvalidConfiguration {
        field: &'static str,
        expected: String,
    },

    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("字体错误：{0}")]
    Font(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),

    #[error("拼接错误：{0}")]
    Compose(String),

    #[error("编码错误：{0}")]
    Encode(String),

    #[error("剪贴板错误：{0}")]
    Clipboard(String),
}

impl PhotoError {
    pub(crate) fn invalid(field: &'static str, expected: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            expected: expected.into(),
        }
    }

    /// 是否属于配置校验失败。
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. })
    }
}

