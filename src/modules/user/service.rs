use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::modules::user::{
    model::{InsertUser, LoginModel, OnboardModel, OnboardUser, Session, SignUpModel, UserResponse},
    repository::{RefreshTokenStore, UserRepository},
    schema::UserEntity,
};
use crate::utils::{hash_password, random_avatar, verify_password, Claims, TypeClaims};
use crate::ENV;

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository + Send + Sync>,
    tokens: Arc<dyn RefreshTokenStore + Send + Sync>,
}

impl UserService {
    pub fn with_dependencies(
        repo: Arc<dyn UserRepository + Send + Sync>,
        tokens: Arc<dyn RefreshTokenStore + Send + Sync>,
    ) -> Self {
        info!("UserService initialized with dependencies");
        UserService { repo, tokens }
    }

    pub async fn me(&self, id: Uuid) -> Result<UserResponse, error::SystemError> {
        let user = self
            .repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;
        let friends = self.repo.find_friend_ids(&id).await?;

        Ok(UserResponse::from(user).with_friends(friends))
    }

    pub async fn sign_up(&self, user: SignUpModel) -> Result<Session, error::SystemError> {
        let email = user.email.trim().to_lowercase();

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(error::SystemError::Conflict(Some(error::DbErrorMeta {
                constraint: Some("uq_users_email".into()),
            })));
        }

        let new_user = InsertUser {
            email,
            hash_password: hash_password(&user.password)?,
            full_name: user.full_name.trim().to_string(),
            profile_pic: random_avatar(),
        };

        let created = self.repo.create(&new_user).await?;
        info!("User {} signed up", created.id);

        self.issue_session(created).await
    }

    pub async fn login(&self, user: LoginModel) -> Result<Session, error::SystemError> {
        let user_entity = self
            .repo
            .find_by_email(user.email.trim())
            .await?
            .ok_or_else(|| error::SystemError::unauthorized("Invalid email or password"))?;

        if !verify_password(&user_entity.hash_password, &user.password)? {
            return Err(error::SystemError::unauthorized("Invalid email or password"));
        }

        self.issue_session(user_entity).await
    }

    pub async fn refresh(
        &self,
        refresh_token: Option<String>,
    ) -> Result<Session, error::SystemError> {
        let token =
            refresh_token.ok_or_else(|| error::SystemError::unauthorized("No refresh token"))?;

        let claims = Claims::decode(&token, ENV.jwt_secret.as_ref())
            .map_err(|_| error::SystemError::unauthorized("Invalid refresh token"))?;

        let jti = match (&claims._type, claims.jti) {
            (Some(TypeClaims::RefreshToken), Some(jti)) => jti,
            _ => return Err(error::SystemError::unauthorized("Invalid refresh token")),
        };

        match self.tokens.take(&jti).await? {
            Some(owner) if owner == claims.sub => {}
            _ => return Err(error::SystemError::unauthorized("Refresh token revoked")),
        }

        let user = self
            .repo
            .find_by_id(&claims.sub)
            .await?
            .ok_or_else(|| error::SystemError::unauthorized("Invalid refresh token"))?;

        self.issue_session(user).await
    }

    pub async fn logout(&self, refresh_token: Option<String>) -> Result<(), error::SystemError> {
        let Some(token) = refresh_token else {
            return Ok(());
        };

        // an unreadable token has nothing left to revoke
        if let Ok(Claims { jti: Some(jti), .. }) = Claims::decode(&token, ENV.jwt_secret.as_ref())
        {
            self.tokens.revoke(&jti).await?;
        }
        Ok(())
    }

    pub async fn onboard(
        &self,
        id: Uuid,
        profile: OnboardModel,
    ) -> Result<UserResponse, error::SystemError> {
        let user = self.repo.onboard(&id, &OnboardUser::from(profile)).await?;
        info!("User {} onboarded", id);
        Ok(UserResponse::from(user))
    }

    async fn issue_session(&self, user: UserEntity) -> Result<Session, error::SystemError> {
        let secret: &[u8] = ENV.jwt_secret.as_ref();

        let access_token = Claims::new(&user.id, ENV.access_token_expiration)
            .with_type(TypeClaims::AccessToken)
            .encode(secret)?;

        let jti = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let refresh_token = Claims::new(&user.id, ENV.refresh_token_expiration)
            .with_jti(jti)
            .with_type(TypeClaims::RefreshToken)
            .encode(secret)?;

        self.tokens.save(&jti, &user.id, ENV.refresh_token_expiration).await?;

        Ok(Session { access_token, refresh_token, user: UserResponse::from(user) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{init_env, MemoryStore};

    fn service(store: &Arc<MemoryStore>) -> UserService {
        UserService::with_dependencies(store.clone(), store.clone())
    }

    fn sign_up_model(email: &str) -> SignUpModel {
        SignUpModel {
            full_name: "Ana Lopez".into(),
            email: email.into(),
            password: "secret1".into(),
        }
    }

    #[actix_web::test]
    async fn duplicate_email_reads_as_email_conflict() {
        init_env();
        let store = Arc::new(MemoryStore::default());
        let svc = service(&store);

        svc.sign_up(sign_up_model("ana@example.com")).await.unwrap();
        let err = match svc.sign_up(sign_up_model("ANA@example.com")).await {
            Err(err) => error::Error::from(err),
            Ok(_) => panic!("second signup with the same email succeeded"),
        };

        assert_eq!(err.to_string(), "Conflict: Email already exists");
    }

    #[actix_web::test]
    async fn concurrent_refreshes_with_one_token_issue_one_session() {
        init_env();
        let store = Arc::new(MemoryStore::default());
        let svc = service(&store);
        let session = svc.sign_up(sign_up_model("ana@example.com")).await.unwrap();

        let (first, second) = tokio::join!(
            svc.refresh(Some(session.refresh_token.clone())),
            svc.refresh(Some(session.refresh_token.clone())),
        );

        let issued = [first.is_ok(), second.is_ok()].into_iter().filter(|ok| *ok).count();
        assert_eq!(issued, 1);
    }
}
