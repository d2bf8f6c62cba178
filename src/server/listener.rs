use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", cfg.port)).await?;
    info!("Listening on port {}", cfg.port);
    info!("Serving files from {}", cfg.base_dir.display());

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let config = cfg.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, config);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
