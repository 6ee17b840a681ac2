//! State shared across all handlers.

use std::sync::Arc;

use domains::traits::{Authenticator, MediaStore};
use services::messages::MessageService;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn Authenticator>,
    pub media: Arc<dyn MediaStore>,
    pub messages: Arc<MessageService>,
}
