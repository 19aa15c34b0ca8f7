// src/test_support.rs
// DOCUMENTATION: In-process fake upstream provider for tests
// PURPOSE: Replays scripted HTTP responses and records what the clients sent

use actix_web::{dev::ServerHandle, http::StatusCode, web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// One request received by the fake upstream
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

struct Script {
    responses: Vec<(u16, Value)>,
    seen: Mutex<Vec<RecordedRequest>>,
}

/// Scripted HTTP server bound to an ephemeral local port
/// The n-th request gets the n-th scripted response; the last one repeats.
pub struct FakeUpstream {
    pub base_url: String,
    script: web::Data<Script>,
    handle: ServerHandle,
}

impl FakeUpstream {
    pub async fn start(responses: Vec<(u16, Value)>) -> Self {
        let script = web::Data::new(Script {
            responses,
            seen: Mutex::new(Vec::new()),
        });
        let app_script = script.clone();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_script.clone())
                .default_service(web::to(reply))
        })
        .workers(1)
        .disable_signals()
        .shutdown_timeout(0)
        .bind(("127.0.0.1", 0))
        .expect("bind fake upstream");

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_rt::spawn(server);

        Self {
            base_url: format!("http://{}", addr),
            script,
            handle,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.script.seen.lock().unwrap().clone()
    }

    pub fn hits(&self) -> usize {
        self.script.seen.lock().unwrap().len()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

async fn reply(script: web::Data<Script>, req: HttpRequest, body: web::Bytes) -> HttpResponse {
    let index = {
        let mut seen = script.seen.lock().unwrap();
        seen.push(RecordedRequest {
            method: req.method().to_string(),
            path: req.path().to_string(),
            query: req.query_string().to_string(),
            authorization: req
                .headers()
                .get("authorization")
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
            body: serde_json::from_slice(&body).ok(),
        });
        seen.len() - 1
    };

    let (status, payload) = script
        .responses
        .get(index)
        .or_else(|| script.responses.last())
        .cloned()
        .unwrap_or((200, Value::Null));

    HttpResponse::build(StatusCode::from_u16(status).unwrap()).json(payload)
}

/// Listener that accepts connections and never answers
/// Returns the base URL and a counter of accepted connections.
pub async fn silent_upstream() -> (String, Arc<AtomicUsize>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind silent upstream");
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let accepted = Arc::new(AtomicUsize::new(0));

    let counter = accepted.clone();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            held.push(stream);
        }
    });

    (base_url, accepted)
}

/// Base URL of a local port with nothing listening on it
pub fn refused_upstream() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
