use uuid::Uuid;

use crate::{
    api::error,
    modules::user::{
        model::{InsertUser, OnboardUser},
        repository::UserRepository,
        schema::UserEntity,
    },
};

#[derive(Clone)]
pub struct UserRepositoryPg {
    pool: sqlx::PgPool,
}

impl UserRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserRepository for UserRepositoryPg {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError> {
        let user = sqlx::query_as::<_, UserEntity>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError> {
        let user =
            sqlx::query_as::<_, UserEntity>("SELECT * FROM users WHERE lower(email) = lower($1)")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(user)
    }

    async fn create(&self, user: &InsertUser) -> Result<UserEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let user = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (id, email, hash_password, full_name, profile_pic)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&user.email)
        .bind(&user.hash_password)
        .bind(&user.full_name)
        .bind(&user.profile_pic)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn onboard(
        &self,
        id: &Uuid,
        profile: &OnboardUser,
    ) -> Result<UserEntity, error::SystemError> {
        let user = sqlx::query_as::<_, UserEntity>(
            r#"
            UPDATE users
            SET
                full_name         = $2,
                bio               = $3,
                native_language   = $4,
                learning_language = $5,
                location          = $6,
                profile_pic       = COALESCE($7, profile_pic),
                is_onboarded      = TRUE,
                updated_at        = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&profile.full_name)
        .bind(&profile.bio)
        .bind(&profile.native_language)
        .bind(&profile.learning_language)
        .bind(&profile.location)
        .bind(profile.profile_pic.as_ref())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        Ok(user)
    }

    async fn find_onboarded_excluding(
        &self,
        excluded: &[Uuid],
    ) -> Result<Vec<UserEntity>, error::SystemError> {
        let users = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT * FROM users
            WHERE is_onboarded
              AND NOT (id = ANY($1))
            ORDER BY created_at, id
            "#,
        )
        .bind(excluded)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn find_friend_ids(&self, user_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT friend_id FROM user_friends WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn find_friends(&self, user_id: &Uuid) -> Result<Vec<UserEntity>, error::SystemError> {
        let friends = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT u.*
            FROM user_friends f
            JOIN users u ON u.id = f.friend_id
            WHERE f.user_id = $1
            ORDER BY f.created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(friends)
    }

    async fn is_friend(
        &self,
        user_id: &Uuid,
        friend_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM user_friends WHERE user_id = $1 AND friend_id = $2)",
        )
        .bind(user_id)
        .bind(friend_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
