use crate::config::Config;
use crate::db::{FileStore, KeyValueStore, MemoryStore};
use crate::middleware::RateLimiter;
use crate::services::ai::AiService;
use crate::services::assistant::{ChatAssistant, ChatService};
use crate::services::consultation::{CannedPrescriptionWriter, PrescriptionWriter};
use crate::services::report_analysis::{CannedReportAnalyzer, ReportAnalyzer};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KeyValueStore>,
    pub chat: ChatService,
    pub reports: Arc<dyn ReportAnalyzer>,
    pub prescriptions: Arc<dyn PrescriptionWriter>,
    pub chat_limiter: RateLimiter,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store: Arc<dyn KeyValueStore> = match &config.store_dir {
            Some(dir) => Arc::new(FileStore::open(dir.clone()).await?),
            None => {
                tracing::info!("STORE_DIR not set, profile data is kept in memory");
                Arc::new(MemoryStore::new())
            }
        };

        let primary: Option<Arc<dyn ChatAssistant>> = match &config.chat.api_key {
            Some(key) => {
                tracing::info!(
                    "Chat model {} via {}",
                    config.chat.model,
                    config.chat.api_base
                );
                Some(Arc::new(AiService::new(key.clone(), &config.chat)))
            }
            None => {
                tracing::warn!("No chat API key configured, chatbot uses rule-based replies");
                None
            }
        };

        Ok(Self {
            store,
            chat: ChatService::new(primary),
            reports: Arc::new(CannedReportAnalyzer),
            prescriptions: Arc::new(CannedPrescriptionWriter),
            chat_limiter: RateLimiter::per_minute(config.chat.rate_limit)
                .trusting_forwarded_for(config.trust_proxy_headers),
        })
    }

    /// Memory store, rule-based chat and the given chat limit.
    pub fn in_memory(chat_rate_limit: usize) -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            chat: ChatService::rule_based(),
            reports: Arc::new(CannedReportAnalyzer),
            prescriptions: Arc::new(CannedPrescriptionWriter),
            chat_limiter: RateLimiter::per_minute(chat_rate_limit),
        }
    }

    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }
}
