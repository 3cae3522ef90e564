use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::{SyncAction, SyncPayload};

use crate::core::error::{Result, ServerError};
use crate::core::Config;
use crate::db::DbService;
use crate::services::SyncService;

/// 资源版本管理器
///
/// 使用 DashMap 实现无锁并发的版本号管理。
/// 每种资源类型维护独立的版本号，支持原子递增。
///
/// # 使用场景
///
/// 用于 broadcast_sync 时自动生成递增的版本号，
/// 确保订阅者可以通过版本号判断数据新旧。
#[derive(Debug)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    /// 创建空的版本管理器
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// 递增指定资源的版本号并返回新值
    ///
    /// 如果资源不存在，从 0 开始递增（返回 1）
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// 获取指定资源的当前版本号
    ///
    /// 如果资源不存在，返回 0
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

impl Default for ResourceVersions {
    fn default() -> Self {
        Self::new()
    }
}

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是运营后端的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | sync | SyncService | 同步总线 |
/// | resource_versions | Arc<ResourceVersions> | 资源版本管理 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 同步总线 (进程内广播)
    pub sync: SyncService,
    /// 资源版本管理器 (用于 broadcast_sync 自动递增版本号)
    pub resource_versions: Arc<ResourceVersions>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/harbor.db)
    /// 3. 同步总线
    pub async fn initialize(config: &Config) -> Result<Self> {
        // 0. Ensure work_dir structure exists
        config.ensure_work_dir_structure()?;

        // 1. Initialize DB under work_dir/database/harbor.db
        let db_path = config.database_dir().join("harbor.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        // 2. Initialize services
        let sync = SyncService::new();
        let resource_versions = Arc::new(ResourceVersions::new());

        Ok(Self {
            config: config.clone(),
            db: db_service.db,
            sync,
            resource_versions,
        })
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取工作目录
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    /// 广播同步消息
    ///
    /// 向所有进程内订阅者广播资源变更通知。
    /// 版本号由 ResourceVersions 自动递增管理。
    ///
    /// # 参数
    /// - `resource`: 资源类型 (如 "department", "order", "stock_level")
    /// - `action`: 变更类型
    /// - `id`: 资源 ID
    /// - `data`: 资源数据 (deleted 时为 None)
    pub fn broadcast_sync<T: serde::Serialize>(
        &self,
        resource: &str,
        action: SyncAction,
        id: &str,
        data: Option<&T>,
    ) {
        let version = self.resource_versions.increment(resource);
        let payload = SyncPayload {
            resource: resource.to_string(),
            version,
            action,
            id: id.to_string(),
            data: data.and_then(|d| serde_json::to_value(d).ok()),
        };
        self.sync.publish(payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_versions_increment() {
        let versions = ResourceVersions::new();
        assert_eq!(versions.get("order"), 0);
        assert_eq!(versions.increment("order"), 1);
        assert_eq!(versions.increment("order"), 2);
        assert_eq!(versions.increment("department"), 1);
        assert_eq!(versions.get("order"), 2);
    }
}
