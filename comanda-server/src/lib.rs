//! Comanda Server - 单店餐厅后台管理 API
//!
//! # 架构概述
//!
//! 本模块是 Comanda Server 的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储 + 实体 repository
//! - **工作流** (`workflow`): 订单/支付/桌台联动与预订冲突检查
//! - **报表** (`reports`): 销售、库存告警、预订汇总、热销排行
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! comanda-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── workflow/      # 多实体业务规则
//! ├── reports/       # 聚合报表
//! ├── db/            # 数据库层 (models + repository)
//! └── utils/         # 错误、日志、时间、校验
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod reports;
pub mod utils;
pub mod workflow;

// Re-export 公共类型
pub use crate::core::{AppState, Config, Server};
pub use crate::utils::logger::{init_logger, init_logger_with_file};
pub use crate::utils::{AppError, AppResult};

/// 设置运行环境 (dotenv + 日志)
///
/// 日志目录可通过 `LOG_DIR` 指定；目录存在时按天滚动写文件。
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(None, log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
   ______                                __
  / ____/___  ____ ___  ____ _____  ____/ /___ _
 / /   / __ \/ __ `__ \/ __ `/ __ \/ __  / __ `/
/ /___/ /_/ / / / / / / /_/ / / / / /_/ / /_/ /
\____/\____/_/ /_/ /_/\__,_/_/ /_/\__,_/\__,_/
    "#
    );
}
