//! HTTP/1 accept loop bridging hyper to the router.

use std::convert::Infallible;
use std::future::Future;
use std::net::IpAddr;
use std::sync::Arc;

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request as HyperRequest, Response as HyperResponse, StatusCode};
use hyper_util::rt::TokioIo;
use oxide_router::{Method, Request, Response, Router};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// Largest request body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 1 << 20;

/// Reads a whole request body, refusing anything over [`MAX_BODY_BYTES`]
/// with a 413.
async fn read_body<B>(body: B) -> Result<Vec<u8>, Response>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match Limited::new(body, MAX_BODY_BYTES).collect().await {
        Ok(collected) => Ok(collected.to_bytes().to_vec()),
        Err(err) if err.is::<LengthLimitError>() => Err(Response::error(
            413,
            &format!("request body exceeds {MAX_BODY_BYTES} bytes"),
        )),
        Err(err) => Err(Response::bad_request(&format!(
            "failed to read request body: {err}"
        ))),
    }
}

/// Converts a hyper request, runs it through the router and converts the
/// response back.
async fn handle_request(
    req: HyperRequest<Incoming>,
    router: Arc<Router>,
    peer: IpAddr,
) -> Result<HyperResponse<Full<Bytes>>, Infallible> {
    let (parts, body) = req.into_parts();
    let response = match Method::parse(parts.method.as_str()) {
        Some(method) => {
            let mut request = Request::new(method, parts.uri.path()).remote_addr(peer);
            if let Some(query) = parts.uri.query() {
                request.query = Request::parse_query_string(query);
            }
            for (key, value) in &parts.headers {
                if let Ok(v) = value.to_str() {
                    request.headers.insert(key.to_string(), v.to_string());
                }
            }

            match read_body(body).await {
                Ok(bytes) => {
                    request.body = bytes;
                    router.handle(request).await
                }
                Err(res) => res,
            }
        }
        None => Response::method_not_allowed(),
    };

    Ok(to_hyper(response))
}

fn to_hyper(response: Response) -> HyperResponse<Full<Bytes>> {
    let mut builder = HyperResponse::builder().status(
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    );
    for (key, value) in &response.headers {
        builder = builder.header(key.as_str(), value.as_str());
    }

    builder
        .body(Full::new(Bytes::from(response.body)))
        .unwrap_or_else(|err| {
            warn!(error = %err, "Invalid response dropped");
            let mut fallback = HyperResponse::new(Full::new(Bytes::new()));
            *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
}

/// Serves `router` on `listener` until `shutdown` resolves.
///
/// Each connection runs on its own task. Connections still open at
/// shutdown are left to finish on their own.
pub async fn serve<F>(listener: TcpListener, router: Arc<Router>, shutdown: F)
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(conn) => conn,
                    Err(err) => {
                        warn!(error = %err, "Failed to accept connection");
                        continue;
                    }
                };
                let io = TokioIo::new(stream);
                let router = router.clone();

                tokio::task::spawn(async move {
                    let service = service_fn(move |req| {
                        let router = router.clone();
                        handle_request(req, router, peer.ip())
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        debug!(error = %err, peer = %peer, "Error serving connection");
                    }
                });
            }
            () = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hyper_keeps_status_and_headers() {
        let res = to_hyper(Response::error(404, "missing").header("X-Test", "1"));
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(res.headers()["X-Test"], "1");
        assert_eq!(res.headers()["Content-Type"], "application/json");
    }

    #[test]
    fn test_to_hyper_invalid_status() {
        let res = to_hyper(Response::new(42));
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_read_body_within_limit() {
        let body = read_body(Full::new(Bytes::from_static(b"{\"a\":1}")))
            .await
            .unwrap();
        assert_eq!(body, b"{\"a\":1}");
    }

    #[tokio::test]
    async fn test_read_body_over_limit_is_413() {
        let oversized = Full::new(Bytes::from(vec![b'x'; MAX_BODY_BYTES + 1]));
        let res = read_body(oversized).await.unwrap_err();
        assert_eq!(res.status, 413);
        assert!(res.json_body().unwrap()["error"]
            .as_str()
            .unwrap()
            .contains("exceeds"));
    }

    #[tokio::test]
    async fn test_serve_stops_on_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        serve(listener, Arc::new(Router::new()), async {}).await;
    }
}
