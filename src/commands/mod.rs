pub mod account;
pub mod init;
pub mod students;
pub mod teams;

use tokio_util::sync::CancellationToken;

use crate::client::ApiClient;
use crate::config::Config;
use crate::session::Session;

/// Everything an authenticated command needs, built once in `main`.
pub struct Context {
    pub config: Config,
    pub client: ApiClient,
    pub session: Session,
    pub cancel: CancellationToken,
}
