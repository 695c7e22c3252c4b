use crate::config::Settings;
use crate::models::AppData;
use crate::webhook::WebhookClient;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub webhook: WebhookClient,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(settings: Settings, webhook: WebhookClient, data: AppData) -> Self {
        Self {
            settings: Arc::new(settings),
            webhook,
            data: Arc::new(Mutex::new(data)),
        }
    }
}
