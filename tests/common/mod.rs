#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{Router, extract::ConnectInfo, response::Html, routing::get};
use tokio::net::TcpListener;

pub const BAKERY_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>Bakery</title>
    <meta name="description" content="Fresh bread daily">
  </head>
  <body>
    <h1>Fresh bread</h1>
    <p>We bake bread every day. Our bread is warm.</p>
    <img src="loaf.jpg" alt="A loaf">
  </body>
</html>"#;

pub const GARBLED_PAGE: &str = "<html><head><title>Caf\u{FFFD}</title></head>\
<body><p>Our caf\u{FFFD} serves bread. Fresh bread daily.</p></body></html>";

pub const BARE_PAGE: &str = r#"<html><body><p>Nothing to see here.</p><img src="x.png"></body></html>"#;

/// A domain that refuses connections.
pub const UNREACHABLE: &str = "127.0.0.1:1";

/// Serves `router` on an ephemeral local port and returns its address.
pub async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Serves `html` at `/` and records the peer address of every request.
pub async fn serve_recording_peers(html: &'static str) -> (SocketAddr, Arc<Mutex<Vec<SocketAddr>>>) {
    let peers = Arc::new(Mutex::new(Vec::new()));
    let recorded = peers.clone();
    let router = Router::new().route(
        "/",
        get(move |ConnectInfo(peer): ConnectInfo<SocketAddr>| {
            let recorded = recorded.clone();
            async move {
                recorded.lock().unwrap().push(peer);
                Html(html)
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .unwrap();
    });
    (addr, peers)
}
