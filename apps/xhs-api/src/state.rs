use std::sync::Arc;

use xhs_service::SearchService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<SearchService>,
}
impl AppState {
	pub fn new(config: xhs_config::Config) -> Self {
		Self::with_service(SearchService::new(config))
	}

	pub fn with_service(service: SearchService) -> Self {
		Self { service: Arc::new(service) }
	}
}
