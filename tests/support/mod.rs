// Boots one robots server per test binary and shares its address with every test.
use std::{
    // `Arc` lets the server thread and the waiting test share the URL slot.
    sync::{Arc, OnceLock},
    // Used for the short sleeps while polling for readiness.
    time::Duration,
};

use serde_json::Value;

// Base URL every test talks to, set once the server has bound its port.
static SERVER_URL: OnceLock<String> = OnceLock::new();
// Guards the bootstrap so concurrent tests never start a second server.
static SERVER_READY: OnceLock<()> = OnceLock::new();

// Start the shared server on first use and return its base URL.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        // The server thread writes its URL here once the listener is bound.
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // A plain OS thread with its own runtime: each `#[tokio::test]` gets a
        // fresh runtime that is torn down when the test ends, and the server
        // must survive that.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // Port 0 lets the OS pick, so parallel test binaries never collide.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{}", addr));
                // Serves until the test process exits.
                robots_server::run(listener).await.expect("server failed");
            });
        });
        wait_for_server(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

// Block until the URL is published and the socket accepts TCP connections.
fn wait_for_server(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };
    let _ = SERVER_URL.set(base_url.clone());

    // Raw TCP check: a successful connect means axum is accepting.
    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");
    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    // Fail loudly rather than letting every test time out on its own.
    panic!("server did not become ready in time");
}

// POST a JSON body; returns the status and the decoded JSON payload.
pub async fn post_json(
    client: &reqwest::Client,
    url: String,
    body: Value,
) -> (reqwest::StatusCode, Value) {
    let res = client
        .post(url)
        .json(&body)
        .send()
        .await
        .expect("request should succeed");
    let status = res.status();
    // Every route answers with JSON, including errors (`{"error": ...}`).
    let payload = res.json().await.expect("json body");
    (status, payload)
}

// GET a route; returns the status and the decoded JSON payload.
pub async fn get_json(client: &reqwest::Client, url: String) -> (reqwest::StatusCode, Value) {
    let res = client.get(url).send().await.expect("request should succeed");
    let status = res.status();
    let payload = res.json().await.expect("json body");
    (status, payload)
}
