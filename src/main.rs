use std::{process, sync::Arc};

use cellar::{
    application::{
        admin::{
            customers::AdminCustomerService, dashboard::AdminDashboardService,
            orders::AdminOrderService, products::AdminProductService,
        },
        catalog::CatalogService,
        error::AppError,
        repos::{CustomersRepo, DashboardRepo, OrdersRepo, ProductsRepo, ProductsWriteRepo},
    },
    cache::{CacheConfig, CacheLoader, ProductCache},
    config,
    infra::{
        db::SqliteRepositories,
        error::InfraError,
        http::{self, AdminState, PublicState},
        telemetry,
    },
};
use tokio::try_join;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Migrate(_) => run_migrate(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repositories = init_repositories(&settings).await?;
    let app = build_application_context(repositories, &settings).await?;

    serve_http(&settings, app.public_state, app.admin_state).await
}

async fn run_migrate(settings: config::Settings) -> Result<(), AppError> {
    init_repositories(&settings).await?;
    info!(
        target = "cellar::migrate",
        database = %settings.database.url,
        "Schema is up to date"
    );
    Ok(())
}

struct ApplicationContext {
    public_state: PublicState,
    admin_state: AdminState,
}

async fn init_repositories(
    settings: &config::Settings,
) -> Result<Arc<SqliteRepositories>, AppError> {
    let pool = SqliteRepositories::connect(
        &settings.database.url,
        settings.database.max_connections.get(),
    )
    .await
    .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    SqliteRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    Ok(Arc::new(SqliteRepositories::new(pool)))
}

async fn build_application_context(
    repositories: Arc<SqliteRepositories>,
    settings: &config::Settings,
) -> Result<ApplicationContext, AppError> {
    let products_repo: Arc<dyn ProductsRepo> = repositories.clone();
    let products_write_repo: Arc<dyn ProductsWriteRepo> = repositories.clone();
    let dashboard_repo: Arc<dyn DashboardRepo> = repositories.clone();
    let customers_repo: Arc<dyn CustomersRepo> = repositories.clone();
    let orders_repo: Arc<dyn OrdersRepo> = repositories.clone();

    let cache_config = CacheConfig::from(&settings.cache);
    let product_cache = if cache_config.is_enabled() {
        let cache = Arc::new(ProductCache::new());
        // Load failure aborts startup.
        CacheLoader::new(products_repo.clone(), cache.clone())
            .load()
            .await?;
        Some(cache)
    } else {
        info!(
            target = "cellar::startup",
            "Product cache disabled; storefront reads go to the database"
        );
        None
    };

    let catalog = Arc::new(CatalogService::new(product_cache, products_repo.clone()));
    let admin_products = Arc::new(AdminProductService::new(
        products_repo,
        products_write_repo,
    ));
    let admin_dashboard = Arc::new(AdminDashboardService::new(dashboard_repo));
    let admin_customers = Arc::new(AdminCustomerService::new(customers_repo, orders_repo.clone()));
    let admin_orders = Arc::new(AdminOrderService::new(orders_repo));

    Ok(ApplicationContext {
        public_state: PublicState {
            catalog,
            db: repositories.clone(),
        },
        admin_state: AdminState {
            db: repositories,
            products: admin_products,
            dashboard: admin_dashboard,
            customers: admin_customers,
            orders: admin_orders,
        },
    })
}

async fn serve_http(
    settings: &config::Settings,
    public_state: PublicState,
    admin_state: AdminState,
) -> Result<(), AppError> {
    let public_router = http::build_public_router(public_state);
    let admin_router = http::build_admin_router(admin_state);

    let public_listener = tokio::net::TcpListener::bind(settings.server.public_addr)
        .await
        .map_err(|err| AppError::from(InfraError::bind(settings.server.public_addr, err)))?;
    let admin_listener = tokio::net::TcpListener::bind(settings.server.admin_addr)
        .await
        .map_err(|err| AppError::from(InfraError::bind(settings.server.admin_addr, err)))?;

    info!(
        target = "cellar::startup",
        public_addr = %settings.server.public_addr,
        admin_addr = %settings.server.admin_addr,
        "Listening"
    );

    let public_server = axum::serve(public_listener, public_router.into_make_service());
    let admin_server = axum::serve(admin_listener, admin_router.into_make_service());

    try_join!(public_server, admin_server).map_err(|err| AppError::from(InfraError::from(err)))?;

    Ok(())
}
