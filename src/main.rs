mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::{Config, DataBackend, StorageBackend};
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::admin::{routes as admin_routes, AdminService};
use crate::features::categories::repositories::{
    CategoryRepository, PgCategoryRepository, PostgrestCategoryRepository,
};
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::images::{routes as images_routes, ImageService};
use crate::features::items::repositories::{
    ItemRepository, PgItemRepository, PostgrestItemRepository,
};
use crate::features::items::{routes as items_routes, ItemService};
use crate::features::menu::{routes as menu_routes, MenuService};
use crate::modules::storage::{ImageStore, MinIOClient, SupabaseStorage};
use crate::modules::supabase::SupabaseClient;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    if config.supabase.url.is_empty() || config.supabase.anon_key.is_empty() {
        tracing::warn!("SUPABASE_URL or SUPABASE_ANON_KEY is empty; backend requests will fail");
    }
    let supabase = Arc::new(SupabaseClient::new(&config.supabase));

    // Data backend
    let (category_repository, item_repository): (
        Arc<dyn CategoryRepository>,
        Arc<dyn ItemRepository>,
    ) = match (config.data.backend, config.database.as_ref()) {
        (DataBackend::Postgres, Some(db_config)) => {
            let pool = database::create_pool(db_config).await?;
            tracing::info!("Database connection pool created");

            tracing::info!("Running database migrations...");
            database::run_migrations(&pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
            tracing::info!("Database migrations completed successfully");

            if db_config.seed_menu {
                let seeded = database::seed_menu(&pool)
                    .await
                    .map_err(|e| anyhow::anyhow!("Menu seed failed: {}", e))?;
                if seeded {
                    tracing::info!("Starter menu inserted");
                } else {
                    tracing::info!("Catalog already populated, starter menu skipped");
                }
            }

            (
                Arc::new(PgCategoryRepository::new(pool.clone())),
                Arc::new(PgItemRepository::new(pool)),
            )
        }
        (DataBackend::Postgres, None) => {
            anyhow::bail!("DATA_BACKEND=postgres requires a database configuration")
        }
        (DataBackend::Supabase, _) => {
            tracing::info!("Using hosted PostgREST data backend");
            (
                Arc::new(PostgrestCategoryRepository::new(Arc::clone(&supabase))),
                Arc::new(PostgrestItemRepository::new(Arc::clone(&supabase))),
            )
        }
    };

    // Image storage
    let image_store: Arc<dyn ImageStore> = match (config.storage.backend, config.minio.clone()) {
        (StorageBackend::S3, Some(minio_config)) => {
            let client =
                MinIOClient::new(minio_config, &config.storage.bucket, &config.storage.prefix)
                    .await?;
            tracing::info!(
                "MinIO image store initialized (bucket: {})",
                config.storage.bucket
            );
            Arc::new(client)
        }
        (StorageBackend::S3, None) => {
            anyhow::bail!("STORAGE_BACKEND=s3 requires MinIO configuration")
        }
        (StorageBackend::Supabase, _) => {
            tracing::info!(
                "Supabase image store initialized (bucket: {})",
                config.storage.bucket
            );
            Arc::new(SupabaseStorage::new(
                (*supabase).clone(),
                config.storage.bucket.clone(),
            ))
        }
    };

    // Services
    let image_service = Arc::new(ImageService::new(
        image_store,
        config.storage.prefix.clone(),
        config.app.max_upload_size,
    ));
    let category_service = Arc::new(CategoryService::new(category_repository));
    let item_service = Arc::new(ItemService::new(
        item_repository,
        Arc::clone(&image_service),
    ));
    let menu_service = Arc::new(MenuService::new(
        Arc::clone(&category_service),
        Arc::clone(&item_service),
        config.site.clone(),
    ));
    let admin_service = Arc::new(AdminService::new(
        Arc::clone(&category_service),
        Arc::clone(&item_service),
        config.site.clone(),
    ));
    tracing::info!("Menu and admin services initialized");

    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(
                Arc::new(credentials),
                "swagger",
            )))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Admin panel and write API
    let admin = Router::new()
        .merge(admin_routes::routes(
            admin_service,
            config.app.max_upload_size,
        ))
        .merge(categories_routes::admin_routes(Arc::clone(
            &category_service,
        )))
        .merge(items_routes::admin_routes(Arc::clone(&item_service)))
        .merge(images_routes::admin_routes(
            image_service,
            config.app.max_upload_size,
        ));

    let admin = if let Some(credentials) = config.admin.credentials() {
        tracing::info!("Admin basic auth enabled");
        admin.route_layer(from_fn(middleware::basic_auth_middleware(
            Arc::new(credentials),
            "admin",
        )))
    } else {
        tracing::warn!("Admin basic auth disabled (no credentials configured)");
        admin
    };

    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let public_routes = Router::new()
        .merge(menu_routes::routes(menu_service))
        .merge(categories_routes::routes(category_service))
        .merge(items_routes::routes(item_service));

    let app = Router::new()
        .merge(swagger)
        .merge(admin)
        .merge(public_routes)
        .merge(health_route)
        .fallback_service(ServeDir::new(&config.site.static_dir))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Menu available at http://{}/", addr);
    tracing::info!("Admin panel available at http://{}/admin", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
