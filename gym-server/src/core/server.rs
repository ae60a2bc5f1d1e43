//! HTTP 服务器
//!
//! 绑定端口、挂载路由并等待 Ctrl+C 优雅退出。

use crate::core::{Config, Result, ServerState};
use crate::services::build_app;

pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    pub async fn run(self) -> Result<()> {
        // 首次运行写入默认设置
        let settings = self.state.settings.get().await;
        tracing::info!(gym = %settings.name, "Settings loaded");

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(%addr, "Gym server listening");

        axum::serve(listener, build_app(self.state))
            .with_graceful_shutdown(async {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::info!("Ctrl+C received, shutting down");
                }
            })
            .await?;

        Ok(())
    }
}
