use std::{net::SocketAddr, sync::Arc, time::Duration};

use reqwest::StatusCode as HttpStatusCode;
use server::{routes::{self, ServerState}, startup};
use service::InMemoryStudentRepository;
use tokio::{net::TcpListener, sync::oneshot};
use tower_http::cors::CorsLayer;

#[tokio::test]
async fn serve_returns_after_shutdown_signal() -> anyhow::Result<()> {
    let state = ServerState::new(Arc::new(InMemoryStudentRepository::new()));
    let app = routes::build_router(state, CorsLayer::very_permissive());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let (tx, rx) = oneshot::channel::<()>();

    let server = tokio::spawn(startup::serve(listener, app, async move {
        let _ = rx.await;
    }));

    let res = reqwest::get(format!("http://{}/health", addr)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let _ = tx.send(());
    let joined = tokio::time::timeout(Duration::from_secs(5), server).await?;
    joined??;

    assert!(reqwest::get(format!("http://{}/health", addr)).await.is_err());
    Ok(())
}
