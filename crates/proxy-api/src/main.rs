//! Finnhub 호환 프록시 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다. upstream 제공자를 프록시하며
//! 캔들 시리즈와 기업 프로필 엔드포인트를 제공합니다.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use proxy_api::routes::create_api_router;
use proxy_api::state::AppState;
use proxy_core::{init_logging_from_env, ProxyConfig};

/// CORS 미들웨어 구성.
///
/// 프록시는 브라우저의 차트 UI에서 직접 호출되므로 모든 origin의
/// GET 요청을 허용합니다.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}

/// 전체 라우터 생성.
fn create_router(state: Arc<AppState>) -> Router {
    create_api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃: upstream 타임아웃보다 여유 있게
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(cors_layer())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    // tracing 초기화
    init_logging_from_env()?;

    info!("Starting finnhub-proxy API server...");

    // 설정 로드 (프로세스 시작 시 한 번)
    let config = ProxyConfig::from_env();

    if config.rapidapi_key.is_none() {
        // API 키가 없어도 기동은 계속한다: upstream 호출이 모두
        // 실패하므로 합성 데이터만 제공된다.
        warn!(
            "RAPIDAPI_KEY_YAHOO_FINANCE not set. Upstream calls will fail and \
             only synthetic fallback data will be served."
        );
    }

    let addr = config.socket_addr()?;
    info!(
        policy = ?config.fallback_policy,
        upstream = %config.upstream_base_url,
        "Configuration loaded"
    );

    let state = Arc::new(AppState::new(config)?);
    let app = create_router(state);

    info!(%addr, "API server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기 (Ctrl+C 또는 SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
