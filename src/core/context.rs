//! # 애플리케이션 컨텍스트
//!
//! 시작 시점에 한 번 조립되어 `web::Data<AppContext>`로 모든 핸들러와 미들웨어에 공유됩니다.
//!
//! ```text
//! AppContext
//! ├── config     - 불변 설정
//! ├── identity   - IdentityService (UserDirectory + IdentityBroker)
//! ├── sessions   - SessionService (UserDirectory + SessionBackend)
//! └── cookies    - CookieSigner (SESSION_SECRET 유도 키)
//! ```
//!
//! 저장소와 브로커는 trait 객체로 주입되므로, 테스트는 메모리 구현과 스텁 브로커로
//! 같은 컨텍스트를 만들 수 있습니다.

use std::sync::Arc;
use crate::config::AppConfig;
use crate::repositories::sessions::SessionBackend;
use crate::repositories::users::UserDirectory;
use crate::services::auth::{CookieSigner, IdentityBroker, IdentityService, SessionService};

pub struct AppContext {
    pub config: AppConfig,
    pub identity: IdentityService,
    pub sessions: SessionService,
    pub cookies: CookieSigner,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        directory: Arc<dyn UserDirectory>,
        session_backend: Arc<dyn SessionBackend>,
        broker: Arc<dyn IdentityBroker>,
    ) -> Self {
        let identity = IdentityService::new(directory.clone(), broker);
        let sessions = SessionService::new(directory, session_backend, config.session.ttl_seconds);
        let cookies = CookieSigner::new(&config.session);

        Self { config, identity, sessions, cookies }
    }
}
