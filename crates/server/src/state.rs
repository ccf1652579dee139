//! Shared application state. Grounded on the teacher's
//! `server/src/state.rs::AppState` (one `Clone`-cheap struct wiring
//! collaborators behind `Arc`s), trimmed to the collaborators this spec
//! actually names (no vector store, translator, audit logger, phonetic
//! corrector — those backed Non-goals).

use crate::collaborators::{
    InMemoryCompanyStore, InMemoryCostAggregator, InMemoryTemplateStore, LoggingNotificationSink, LoggingTraceSink,
    MockLlmFallback, NullNameDictionary, NullPatternLearningLog,
};
use receptionist_router::optimization::AlwaysUseLlmPolicy;
use receptionist_router::Router;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub router: Router,
    pub template_store: Arc<InMemoryTemplateStore>,
    pub company_store: Arc<InMemoryCompanyStore>,
}

impl AppState {
    pub fn new() -> Self {
        let template_store = Arc::new(InMemoryTemplateStore::new());
        let company_store = Arc::new(InMemoryCompanyStore::new());

        let router = Router::new(
            template_store.clone(),
            company_store.clone(),
            Arc::new(MockLlmFallback),
            Arc::new(InMemoryCostAggregator::new()),
            Arc::new(AlwaysUseLlmPolicy),
            Arc::new(NullPatternLearningLog),
            Arc::new(LoggingTraceSink),
        )
        .with_name_dictionary(Arc::new(NullNameDictionary))
        .with_notification_sink(Arc::new(LoggingNotificationSink));

        Self { router, template_store, company_store }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
