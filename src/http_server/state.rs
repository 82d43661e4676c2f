use std::sync::Arc;

use crate::ports::navidrome::NavidromeClient;
use crate::services::navidrome::ServerInfo;

pub struct AppState {
    pub navidrome: Arc<dyn NavidromeClient>,
    pub server_info: ServerInfo,
}
