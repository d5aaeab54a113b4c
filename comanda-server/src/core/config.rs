//! Server configuration

use std::path::PathBuf;
use std::str::FromStr;

use chrono_tz::Tz;
use rust_decimal::Decimal;

/// 服务器配置 - 所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/comanda | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | TIMEZONE | UTC | 营业时区 (报表日期边界) |
/// | TAX_RATE | 0.08 | 税率 (支付创建时计算) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/comanda HTTP_PORT=8080 TAX_RATE=0.10 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 营业时区，用于日期→时间戳转换
    pub timezone: Tz,
    /// 税率 (比例值，0.08 = 8%)，注入支付工作流
    pub tax_rate: Decimal,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/comanda".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .and_then(|tz| {
                    tz.parse::<Tz>()
                        .map_err(|_| tracing::warn!("Invalid TIMEZONE '{}', using UTC", tz))
                        .ok()
                })
                .unwrap_or(Tz::UTC),
            tax_rate: std::env::var("TAX_RATE")
                .ok()
                .and_then(|r| {
                    Decimal::from_str(&r)
                        .map_err(|_| tracing::warn!("Invalid TAX_RATE '{}', using 0.08", r))
                        .ok()
                })
                .unwrap_or_else(default_tax_rate),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 数据库目录 (work_dir/database)
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

/// 默认税率 8%
fn default_tax_rate() -> Decimal {
    Decimal::new(8, 2)
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
