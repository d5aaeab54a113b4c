//! Application state

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::reports::ReportService;
use crate::workflow::{OrderWorkflow, PaymentWorkflow, ReservationWorkflow};

/// 应用状态 - 持有配置和数据库的共享引用
///
/// Handlers 通过它构造 repository / workflow / report 服务；
/// 克隆成本极低 (数据库连接内部是 Arc)。
#[derive(Clone)]
pub struct AppState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
}

impl AppState {
    /// 初始化应用状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/comanda.db)
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_dir().join("comanda.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        Ok(Self {
            config: config.clone(),
            db: db_service.db,
        })
    }

    /// 内存数据库状态 (测试场景)
    pub async fn in_memory(config: Config) -> anyhow::Result<Self> {
        let db_service = DbService::memory().await?;
        Ok(Self {
            config,
            db: db_service.db,
        })
    }

    /// 订单工作流
    pub fn order_workflow(&self) -> OrderWorkflow {
        OrderWorkflow::new(self.db.clone())
    }

    /// 支付工作流 (注入配置税率)
    pub fn payment_workflow(&self) -> PaymentWorkflow {
        PaymentWorkflow::new(self.db.clone(), self.config.tax_rate)
    }

    /// 预订工作流
    pub fn reservation_workflow(&self) -> ReservationWorkflow {
        ReservationWorkflow::new(self.db.clone())
    }

    /// 报表服务 (注入营业时区)
    pub fn report_service(&self) -> ReportService {
        ReportService::new(self.db.clone(), self.config.timezone)
    }
}
