use uuid::Uuid;

use crate::{api::error, configs::RedisCache, modules::user::repository::RefreshTokenStore};

fn refresh_key(jti: &Uuid) -> String {
    format!("refresh_token:{jti}")
}

#[async_trait::async_trait]
impl RefreshTokenStore for RedisCache {
    async fn save(
        &self,
        jti: &Uuid,
        user_id: &Uuid,
        ttl_secs: u64,
    ) -> Result<(), error::SystemError> {
        self.set(&refresh_key(jti), user_id, ttl_secs).await
    }

    async fn take(&self, jti: &Uuid) -> Result<Option<Uuid>, error::SystemError> {
        RedisCache::take::<Uuid>(self, &refresh_key(jti)).await
    }

    async fn revoke(&self, jti: &Uuid) -> Result<(), error::SystemError> {
        self.delete(&refresh_key(jti)).await
    }
}
