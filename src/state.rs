use crate::store::GoalStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn GoalStore>,
}

impl AppState {
    pub fn new(store: impl GoalStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
