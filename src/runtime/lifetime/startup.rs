use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::drive::{DriveClient, DriveTokenManager, create_drive_client};
use crate::events::{ContentEventBus, spawn_cache_invalidator};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::NewUser;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_random_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub drive: Arc<dyn DriveClient>,
    pub drive_tokens: Arc<DriveTokenManager>,
}

async fn build_cache(cache_type: &str) -> Option<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(cache_type)?;
    match constructor().await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", cache_type);
            Some(Arc::from(cache))
        }
        Err(e) => {
            warn!("Failed to create {} cache: {}", cache_type, e);
            None
        }
    }
}

/// 创建缓存实例，配置的后端不可用时回退到内存缓存
async fn create_cache() -> Result<Arc<dyn ObjectCache>, Box<dyn std::error::Error>> {
    let config = AppConfig::get();
    let cache_type = &config.cache.cache_type;

    warn!("Attempting to create {} cache backend", cache_type);

    if let Some(cache) = build_cache(cache_type).await {
        return Ok(cache);
    }

    if cache_type != "moka" {
        warn!("Falling back to Moka (in-memory) cache");
        if let Some(cache) = build_cache("moka").await {
            return Ok(cache);
        }
    }

    Err(format!("No cache backend available (tried: {cache_type})").into())
}

/// 数据库中没有任何用户时创建默认超级管理员
async fn seed_super_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} user(s), skipping super admin seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No users found in database, creating default super admin account...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping super admin seed", e);
            return;
        }
    }

    // 优先使用环境变量中的密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated super admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@school.local".to_string());

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping seed", e);
            return;
        }
    };

    let admin = NewUser {
        name: "Super Administrator".to_string(),
        email: email.to_lowercase(),
        password_hash,
        role: UserRole::SuperAdmin,
    };

    match storage.create_user(admin).await {
        Ok(user) => info!(
            "Default super admin created (ID: {}, email: {})",
            user.id, user.email
        ),
        Err(e) => warn!("Failed to create super admin account: {}", e),
    }
}

/// 准备服务器启动的上下文
/// 包括存储、缓存、Drive 客户端与缓存失效任务
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    seed_super_admin(&storage).await;

    let cache = create_cache().await.expect("Failed to create cache");
    warn!("Cache backend initialized");

    let (drive, drive_tokens) =
        create_drive_client(storage.clone()).expect("Failed to create Google Drive client");
    warn!("File storage backend: {}", drive.backend());

    spawn_cache_invalidator(ContentEventBus::get().subscribe(), cache.clone());

    StartupContext {
        storage,
        cache,
        drive,
        drive_tokens,
    }
}
