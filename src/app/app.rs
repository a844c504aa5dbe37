use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{AdminUserConfig, AppConfig, CompanyConfig, ConfigError, EmailConfig, JwtConfig, MongoConfig, StorageBackend};
use crate::handler::health_handler::health_handler;
use crate::middlewares::admin_middleware::AdminAuthState;
use crate::model::{callback::Callback, invoice::Invoice, project::Project, quote::Quote, review::Review, user::User};
use crate::repository::mongo_repo::connect_database;
use crate::repository::repository_error::RepositoryError;
use crate::repository::{MemoryRepository, MongoRepository, Repository};
use crate::router::{
    callback_router::callback_router, invoice_router::invoice_router, project_router::project_router,
    quote_router::quote_router, review_router::review_router, stats_router::stats_router, user_router::user_router,
};
use crate::service::callback_service::CallbackServiceImpl;
use crate::service::invoice_service::InvoiceServiceImpl;
use crate::service::notification_service::NotificationService;
use crate::service::project_service::ProjectServiceImpl;
use crate::service::quote_service::QuoteServiceImpl;
use crate::service::review_service::ReviewServiceImpl;
use crate::service::stats_service::StatsService;
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::email::{EmailError, Mailer, NoopMailer, SmtpEmailService};
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Email error: {0}")]
    Email(#[from] EmailError),
    #[error("Invalid listen address: {0}")]
    Address(#[from] std::net::AddrParseError),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// One repository per collection.
#[derive(Clone)]
pub struct Repositories {
    pub quotes: Arc<dyn Repository<Quote>>,
    pub callbacks: Arc<dyn Repository<Callback>>,
    pub invoices: Arc<dyn Repository<Invoice>>,
    pub projects: Arc<dyn Repository<Project>>,
    pub reviews: Arc<dyn Repository<Review>>,
    pub users: Arc<dyn Repository<User>>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Repositories {
            quotes: Arc::new(MemoryRepository::<Quote>::new()),
            callbacks: Arc::new(MemoryRepository::<Callback>::new()),
            invoices: Arc::new(MemoryRepository::<Invoice>::new().with_unique_field("invoice_number")),
            projects: Arc::new(MemoryRepository::<Project>::new().with_unique_field("slug")),
            reviews: Arc::new(MemoryRepository::<Review>::new()),
            users: Arc::new(MemoryRepository::<User>::new().with_unique_field("email")),
        }
    }

    pub async fn mongo(config: &MongoConfig) -> Result<Self, AppError> {
        let db = connect_database(config).await?;

        let invoices = MongoRepository::<Invoice>::new(&db);
        invoices.ensure_unique_index("invoice_number").await?;
        let projects = MongoRepository::<Project>::new(&db);
        projects.ensure_unique_index("slug").await?;
        let users = MongoRepository::<User>::new(&db);
        users.ensure_unique_index("email").await?;

        Ok(Repositories {
            quotes: Arc::new(MongoRepository::<Quote>::new(&db)),
            callbacks: Arc::new(MongoRepository::<Callback>::new(&db)),
            invoices: Arc::new(invoices),
            projects: Arc::new(projects),
            reviews: Arc::new(MongoRepository::<Review>::new(&db)),
            users: Arc::new(users),
        })
    }
}

/// Every service the router needs, wired over one set of repositories.
pub struct Services {
    pub quote_service: Arc<QuoteServiceImpl>,
    pub callback_service: Arc<CallbackServiceImpl>,
    pub invoice_service: Arc<InvoiceServiceImpl>,
    pub project_service: Arc<ProjectServiceImpl>,
    pub review_service: Arc<ReviewServiceImpl>,
    pub stats_service: Arc<StatsService>,
    pub user_service: Arc<UserServiceImpl>,
    pub jwt_utils: Arc<dyn JwtTokenUtils>,
}

impl Services {
    pub fn new(
        repos: Repositories,
        mailer: Arc<dyn Mailer>,
        company: CompanyConfig,
        admin_email: Option<String>,
        jwt_utils: Arc<dyn JwtTokenUtils>,
    ) -> Self {
        let notifications = Arc::new(NotificationService::new(mailer, company, admin_email));
        Services {
            quote_service: Arc::new(QuoteServiceImpl::new(repos.quotes.clone(), notifications.clone())),
            callback_service: Arc::new(CallbackServiceImpl::new(repos.callbacks.clone(), notifications.clone())),
            invoice_service: Arc::new(InvoiceServiceImpl::new(repos.invoices.clone(), notifications)),
            project_service: Arc::new(ProjectServiceImpl::new(repos.projects.clone())),
            review_service: Arc::new(ReviewServiceImpl::new(repos.reviews.clone())),
            stats_service: Arc::new(StatsService {
                quote_repo: repos.quotes,
                callback_repo: repos.callbacks,
                invoice_repo: repos.invoices,
                project_repo: repos.projects,
                review_repo: repos.reviews,
            }),
            user_service: Arc::new(UserServiceImpl::new(repos.users, jwt_utils.clone())),
            jwt_utils,
        }
    }

    pub fn router(&self) -> Router {
        let admin_auth_state = Arc::new(AdminAuthState { jwt_utils: self.jwt_utils.clone() });
        Router::new()
            .merge(quote_router(self.quote_service.clone(), admin_auth_state.clone()))
            .merge(callback_router(self.callback_service.clone(), admin_auth_state.clone()))
            .merge(invoice_router(self.invoice_service.clone(), admin_auth_state.clone()))
            .merge(project_router(self.project_service.clone(), admin_auth_state.clone()))
            .merge(review_router(self.review_service.clone(), admin_auth_state.clone()))
            .merge(stats_router(self.stats_service.clone(), admin_auth_state))
            .merge(user_router(self.user_service.clone()))
            .route("/health", get(health_handler))
    }
}

pub struct App {
    config: AppConfig,
    router: Router,
    pub services: Services,
}

impl App {
    pub async fn new() -> Result<Self, AppError> {
        let config = AppConfig::from_env()?;
        let jwt_config = JwtConfig::from_env()?;
        let email_config = EmailConfig::from_env()?;
        let company = CompanyConfig::from_env()?;

        let repos = match config.storage_backend {
            StorageBackend::Mongo => Repositories::mongo(&MongoConfig::from_env()?).await?,
            StorageBackend::Memory => {
                warn!("Using in-memory storage, data is lost on restart");
                Repositories::in_memory()
            }
        };

        let mailer: Arc<dyn Mailer> = if email_config.enabled {
            Arc::new(SmtpEmailService::new(email_config)?)
        } else {
            warn!("Email delivery disabled, outgoing mail is only logged");
            Arc::new(NoopMailer)
        };

        let jwt_utils: Arc<dyn JwtTokenUtils> = Arc::new(JwtTokenUtilsImpl::new(jwt_config));
        let services = Services::new(repos, mailer, company, config.admin_notification_email.clone(), jwt_utils);
        let router = services.router();

        let app = App { config, router, services };
        app.create_first_admin_user().await;
        Ok(app)
    }

    pub async fn start(self) -> Result<(), AppError> {
        let addr = SocketAddr::new(self.config.host.parse()?, self.config.port);
        info!("Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;
        Ok(())
    }

    async fn create_first_admin_user(&self) {
        let admin_conf = match AdminUserConfig::from_env() {
            Ok(c) => c,
            Err(e) => {
                warn!("Admin user config not loaded: {e}");
                return;
            }
        };
        if let Err(e) = self.services.user_service.ensure_admin(&admin_conf).await {
            tracing::error!("Failed to create admin user: {e}");
        }
    }
}
