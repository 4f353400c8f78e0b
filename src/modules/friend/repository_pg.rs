use uuid::Uuid;

use crate::{
    api::error,
    modules::friend::{
        model::{FriendRequestResponse, FriendUserRow},
        repository::FriendRequestRepository,
        schema::{FriendRequestEntity, FriendRequestStatus},
    },
};

#[derive(Clone)]
pub struct FriendRepositoryPg {
    pool: sqlx::PgPool,
}

impl FriendRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FriendRequestRepository for FriendRepositoryPg {
    async fn find_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError> {
        let request = sqlx::query_as::<_, FriendRequestEntity>(
            r#"
            SELECT *
            FROM friend_requests
            WHERE
                (sender_id = $1 AND recipient_id = $2)
            OR (sender_id = $2 AND recipient_id = $1)
            LIMIT 1
            "#,
        )
        .bind(user_id_a)
        .bind(user_id_b)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    async fn find_by_id(
        &self,
        request_id: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError> {
        let request =
            sqlx::query_as::<_, FriendRequestEntity>("SELECT * FROM friend_requests WHERE id = $1")
                .bind(request_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(request)
    }

    async fn find_to_user(
        &self,
        user_id: &Uuid,
        status: FriendRequestStatus,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError> {
        let rows = sqlx::query_as::<_, FriendUserRow>(
            r#"
            SELECT
                fr.id AS req_id,
                fr.status,
                fr.created_at,
                u.id AS user_id,
                u.full_name,
                u.profile_pic,
                u.native_language,
                u.learning_language
            FROM friend_requests fr
            JOIN users u
                ON fr.sender_id = u.id
            WHERE fr.recipient_id = $1
              AND fr.status = $2
            ORDER BY fr.created_at
            "#,
        )
        .bind(user_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_incoming(*user_id)).collect())
    }

    async fn find_from_user(
        &self,
        user_id: &Uuid,
        status: FriendRequestStatus,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError> {
        let rows = sqlx::query_as::<_, FriendUserRow>(
            r#"
            SELECT
                fr.id AS req_id,
                fr.status,
                fr.created_at,
                u.id AS user_id,
                u.full_name,
                u.profile_pic,
                u.native_language,
                u.learning_language
            FROM friend_requests fr
            JOIN users u
                ON fr.recipient_id = u.id
            WHERE fr.sender_id = $1
              AND fr.status = $2
            ORDER BY fr.created_at
            "#,
        )
        .bind(user_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_outgoing(*user_id)).collect())
    }

    async fn create(
        &self,
        sender_id: &Uuid,
        recipient_id: &Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let request = sqlx::query_as::<_, FriendRequestEntity>(
            r#"
            INSERT INTO friend_requests (id, sender_id, recipient_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(sender_id)
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    async fn accept(&self, request_id: &Uuid) -> Result<FriendRequestEntity, error::SystemError> {
        let mut tx = self.pool.begin().await?;

        let request = sqlx::query_as::<_, FriendRequestEntity>(
            r#"
            UPDATE friend_requests
            SET status = 'accepted', updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(request_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| error::SystemError::not_found("Friend Request not found"))?;

        sqlx::query(
            r#"
            INSERT INTO user_friends (user_id, friend_id)
            VALUES ($1, $2), ($2, $1)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(request.sender_id)
        .bind(request.recipient_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(request)
    }

    async fn delete_pending(&self, request_id: &Uuid) -> Result<bool, error::SystemError> {
        let result =
            sqlx::query("DELETE FROM friend_requests WHERE id = $1 AND status = 'pending'")
                .bind(request_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
