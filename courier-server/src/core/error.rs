use thiserror::Error;

/// 服务器级错误 - 启动和运行期间的故障
///
/// 请求处理错误使用 [`crate::utils::AppError`]，这里只覆盖启动路径。
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("数据库错误: {0}")]
    Database(String),

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

/// 启动路径的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
