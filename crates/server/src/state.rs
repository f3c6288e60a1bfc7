use std::sync::Arc;

use service::todos::TodoStore;

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<dyn TodoStore>,
}

impl ServerState {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }
}
