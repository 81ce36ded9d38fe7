//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义应用级 `AppError`，命令行入口统一返回 `Result<T, AppError>`。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `PhotoError` 与 `std::io::Error` 提供 `From` 转换，无需手动 map。

use crate::photo::PhotoError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 像素文字图流水线错误（配置 / 加载 / 渲染 / 输出）
    #[error("{0}")]
    Photo(#[from] PhotoError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 设置文件解析失败
    #[error("设置文件错误: {0}")]
    Settings(String),
}

impl AppError {
    /// 进程退出码：配置错误为 2，其余为 1。
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Photo(err) if err.is_invalid_configuration() => 2,
            Self::Settings(_) => 2,
            _ => 1,
        }
    }
}
