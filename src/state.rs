use sqlx::PgPool;

use crate::auth::JwtService;
use crate::config::Config;
use crate::email::notifier_from_config;
use crate::services::{AuthService, EventService, UserService};
use crate::store::{EventStore, RegistrationStore, UserStore};

/// Everything a request handler needs, constructed once in `main` and passed
/// down through the router. No module-level singletons.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub auth: AuthService,
    pub events: EventService,
    pub users: UserService,
    pub jwt: JwtService,
    pub user_store: UserStore,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Self {
        let user_store = UserStore::new(pool.clone());
        let event_store = EventStore::new(pool.clone());
        let registration_store = RegistrationStore::new(pool);

        let jwt = JwtService::new(&config.jwt_secret, config.token_ttl_hours);
        let notifier = notifier_from_config(&config);

        Self {
            auth: AuthService::new(user_store.clone(), jwt.clone()),
            events: EventService::new(
                event_store,
                registration_store.clone(),
                user_store.clone(),
                notifier,
            ),
            users: UserService::new(user_store.clone(), registration_store),
            jwt,
            user_store,
            config,
        }
    }
}
