//! Server lifecycle over a real TCP listener.

use std::time::Duration;

use mergington_api::{AppState, Server};
use mergington_core::ActivityStore;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

async fn raw_request(addr: std::net::SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_serves_signup_over_tcp_then_shuts_down() {
    let server = Server::from_state(
        "127.0.0.1:0".parse().unwrap(),
        AppState::new(ActivityStore::with_default_catalog()),
    );
    let bound = server.bind().await.unwrap();
    let addr = bound.local_addr().unwrap();

    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(bound.serve_with_shutdown(async {
        let _ = rx.await;
    }));

    let response = raw_request(
        addr,
        "POST /activities/Chess%20Club/signup?email=tcp@mergington.edu HTTP/1.1\r\n\
         Host: localhost\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
    )
    .await;
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.contains("Signed up tcp@mergington.edu for Chess Club"));

    let response = raw_request(
        addr,
        "GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;
    assert!(response.starts_with("HTTP/1.1 307"), "{response}");
    assert!(
        response
            .to_lowercase()
            .contains("location: /static/index.html")
    );

    tx.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server should stop after shutdown signal")
        .unwrap()
        .unwrap();
}
