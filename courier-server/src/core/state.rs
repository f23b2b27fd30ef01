use std::sync::Arc;

use chrono::{DateTime, Utc};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::orders::OrderManager;

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是服务的核心数据结构，使用 Arc 实现浅拷贝，
/// 克隆成本极低，可以安全地传入每个请求处理器。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | order_manager | Arc<OrderManager> | 订单生命周期引擎 (唯一变更入口) |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
    /// 订单生命周期引擎
    pub order_manager: Arc<OrderManager>,
    /// 启动时间 (用于健康检查)
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/courier.db)
    /// 3. JWT 服务与订单管理器
    pub async fn initialize(config: &Config) -> Result<Self> {
        // 0. Ensure work_dir structure exists
        config.ensure_work_dir_structure()?;

        // 1. Initialize DB
        let db_path = config.database_dir().join("courier.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;
        let db = db_service.db;

        // 2. Initialize services
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let order_manager = Arc::new(OrderManager::new(db.clone()));

        Ok(Self {
            config: config.clone(),
            db,
            jwt_service,
            order_manager,
            started_at: Utc::now(),
        })
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 获取订单生命周期引擎
    pub fn order_manager(&self) -> &OrderManager {
        &self.order_manager
    }
}
