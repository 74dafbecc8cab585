use std::fmt;

#[derive(Debug, Clone)]
pub enum RelinkerError {
    Config(String),
    FileOperation(String),
    Serialization(String),
    Password(String),
}

impl RelinkerError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            RelinkerError::Config(_) => "E001",
            RelinkerError::FileOperation(_) => "E002",
            RelinkerError::Serialization(_) => "E003",
            RelinkerError::Password(_) => "E004",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            RelinkerError::Config(_) => "Configuration Error",
            RelinkerError::FileOperation(_) => "File Operation Error",
            RelinkerError::Serialization(_) => "Serialization Error",
            RelinkerError::Password(_) => "Password Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            RelinkerError::Config(msg)
            | RelinkerError::FileOperation(msg)
            | RelinkerError::Serialization(msg)
            | RelinkerError::Password(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于日志与 HTTP 响应体以外的场景）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for RelinkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for RelinkerError {}

// 便捷的构造函数
impl RelinkerError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        RelinkerError::Config(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        RelinkerError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        RelinkerError::Serialization(msg.into())
    }

    pub fn password<T: Into<String>>(msg: T) -> Self {
        RelinkerError::Password(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<std::io::Error> for RelinkerError {
    fn from(err: std::io::Error) -> Self {
        RelinkerError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for RelinkerError {
    fn from(err: serde_json::Error) -> Self {
        RelinkerError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for RelinkerError {
    fn from(err: config::ConfigError) -> Self {
        RelinkerError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for RelinkerError {
    fn from(err: toml::ser::Error) -> Self {
        RelinkerError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RelinkerError>;
