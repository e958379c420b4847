use axum::extract::FromRef;

use crate::business_store::BusinessStore;
use crate::user::UserManager;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use super::ServerConfig;

pub type GuardedBusinessStore = Arc<dyn BusinessStore>;
pub type GuardedUserManager = Arc<Mutex<UserManager>>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub business_store: GuardedBusinessStore,
    pub user_manager: GuardedUserManager,
    pub hash: String,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        business_store: GuardedBusinessStore,
        user_manager: UserManager,
    ) -> Self {
        ServerState {
            config,
            start_time: Instant::now(),
            business_store,
            user_manager: Arc::new(Mutex::new(user_manager)),
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

impl FromRef<ServerState> for GuardedBusinessStore {
    fn from_ref(input: &ServerState) -> Self {
        input.business_store.clone()
    }
}

impl FromRef<ServerState> for GuardedUserManager {
    fn from_ref(input: &ServerState) -> Self {
        input.user_manager.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
