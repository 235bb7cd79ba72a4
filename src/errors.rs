use std::fmt;

#[derive(Debug, Clone)]
pub enum IpLocationsError {
    StoreConnection(String),
    StoreOperation(String),
    StorePluginNotFound(String),
    CorruptEntry(String),
    Validation(String),
    ShardSpan(String),
    RangeOverlap(String),
    FileOperation(String),
    Serialization(String),
    Config(String),
}

impl IpLocationsError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            IpLocationsError::StoreConnection(_) => "E001",
            IpLocationsError::StoreOperation(_) => "E002",
            IpLocationsError::StorePluginNotFound(_) => "E003",
            IpLocationsError::CorruptEntry(_) => "E004",
            IpLocationsError::Validation(_) => "E005",
            IpLocationsError::ShardSpan(_) => "E006",
            IpLocationsError::RangeOverlap(_) => "E007",
            IpLocationsError::FileOperation(_) => "E008",
            IpLocationsError::Serialization(_) => "E009",
            IpLocationsError::Config(_) => "E010",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            IpLocationsError::StoreConnection(_) => "Store Connection Error",
            IpLocationsError::StoreOperation(_) => "Store Operation Error",
            IpLocationsError::StorePluginNotFound(_) => "Store Plugin Not Found",
            IpLocationsError::CorruptEntry(_) => "Corrupt Range Entry",
            IpLocationsError::Validation(_) => "Validation Error",
            IpLocationsError::ShardSpan(_) => "Range Spans Shards",
            IpLocationsError::RangeOverlap(_) => "Range Overlap",
            IpLocationsError::FileOperation(_) => "File Operation Error",
            IpLocationsError::Serialization(_) => "Serialization Error",
            IpLocationsError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            IpLocationsError::StoreConnection(msg) => msg,
            IpLocationsError::StoreOperation(msg) => msg,
            IpLocationsError::StorePluginNotFound(msg) => msg,
            IpLocationsError::CorruptEntry(msg) => msg,
            IpLocationsError::Validation(msg) => msg,
            IpLocationsError::ShardSpan(msg) => msg,
            IpLocationsError::RangeOverlap(msg) => msg,
            IpLocationsError::FileOperation(msg) => msg,
            IpLocationsError::Serialization(msg) => msg,
            IpLocationsError::Config(msg) => msg,
        }
    }

    /// 存储层故障（连接或往返失败），调用方应映射为 5xx 而不是 404
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            IpLocationsError::StoreConnection(_)
                | IpLocationsError::StoreOperation(_)
                | IpLocationsError::CorruptEntry(_)
        )
    }

    /// 格式化为彩色输出（用于 Server 模式）
    #[cfg(feature = "server")]
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

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for IpLocationsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for IpLocationsError {}

// 便捷的构造函数
impl IpLocationsError {
    pub fn store_connection<T: Into<String>>(msg: T) -> Self {
        IpLocationsError::StoreConnection(msg.into())
    }

    pub fn store_operation<T: Into<String>>(msg: T) -> Self {
        IpLocationsError::StoreOperation(msg.into())
    }

    pub fn store_plugin_not_found<T: Into<String>>(msg: T) -> Self {
        IpLocationsError::StorePluginNotFound(msg.into())
    }

    pub fn corrupt_entry<T: Into<String>>(msg: T) -> Self {
        IpLocationsError::CorruptEntry(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        IpLocationsError::Validation(msg.into())
    }

    pub fn shard_span<T: Into<String>>(msg: T) -> Self {
        IpLocationsError::ShardSpan(msg.into())
    }

    pub fn range_overlap<T: Into<String>>(msg: T) -> Self {
        IpLocationsError::RangeOverlap(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        IpLocationsError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        IpLocationsError::Serialization(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        IpLocationsError::Config(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<redis::RedisError> for IpLocationsError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_refusal() || err.is_connection_dropped() || err.is_timeout() {
            IpLocationsError::StoreConnection(err.to_string())
        } else {
            IpLocationsError::StoreOperation(err.to_string())
        }
    }
}

impl From<std::io::Error> for IpLocationsError {
    fn from(err: std::io::Error) -> Self {
        IpLocationsError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for IpLocationsError {
    fn from(err: serde_json::Error) -> Self {
        IpLocationsError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for IpLocationsError {
    fn from(err: csv::Error) -> Self {
        IpLocationsError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IpLocationsError>;
