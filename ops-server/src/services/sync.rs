//! 同步总线服务
//!
//! 进程内的资源变更广播。每个成功的写操作发布一条 [`SyncPayload`]，
//! 订阅者通过 `subscribe()` 拿到一个 broadcast receiver。
//!
//! 当前的消费者是一个日志监听器后台任务；将来 POS 终端接入时可以把
//! receiver 接到网络层而不需要改动发布方。

use shared::SyncPayload;
use tokio::sync::broadcast;

use crate::core::tasks::{BackgroundTasks, TaskKind};

/// 广播通道容量
///
/// 落后超过这个数量的订阅者会收到 Lagged 并丢失最旧的消息。
const SYNC_CHANNEL_CAPACITY: usize = 256;

/// In-process sync bus
#[derive(Clone, Debug)]
pub struct SyncService {
    tx: broadcast::Sender<SyncPayload>,
}

impl SyncService {
    /// 创建同步总线
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(SYNC_CHANNEL_CAPACITY);
        Self { tx }
    }

    /// 发布一条变更消息
    ///
    /// 没有订阅者时发布会失败，这不是错误 (服务器刚启动时的正常状态)。
    /// 返回当前收到消息的订阅者数量。
    pub fn publish(&self, payload: SyncPayload) -> usize {
        match self.tx.send(payload) {
            Ok(receivers) => receivers,
            Err(_) => 0,
        }
    }

    /// 订阅变更消息
    pub fn subscribe(&self) -> broadcast::Receiver<SyncPayload> {
        self.tx.subscribe()
    }

    /// 启动日志监听器后台任务
    ///
    /// 订阅总线并把每条变更写入 debug 日志，直到收到取消信号。
    pub fn start_listener(&self, tasks: &mut BackgroundTasks) {
        let mut rx = self.subscribe();
        let token = tasks.shutdown_token();
        tasks.spawn("sync_listener", TaskKind::Listener, async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    msg = rx.recv() => match msg {
                        Ok(payload) => {
                            tracing::debug!(
                                resource = %payload.resource,
                                action = ?payload.action,
                                id = %payload.id,
                                version = payload.version,
                                "resource changed"
                            );
                        }
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            tracing::warn!(skipped = n, "sync listener lagged behind");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
            }
        });
    }
}

impl Default for SyncService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::SyncAction;

    fn payload(version: u64) -> SyncPayload {
        SyncPayload {
            resource: "department".into(),
            version,
            action: SyncAction::Created,
            id: "department:front".into(),
            data: None,
        }
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_noop() {
        let bus = SyncService::new();
        assert_eq!(bus.publish(payload(1)), 0);
    }

    #[tokio::test]
    async fn test_subscriber_receives_in_order() {
        let bus = SyncService::new();
        let mut rx = bus.subscribe();
        bus.publish(payload(1));
        bus.publish(payload(2));

        assert_eq!(rx.recv().await.unwrap().version, 1);
        assert_eq!(rx.recv().await.unwrap().version, 2);
    }
}
