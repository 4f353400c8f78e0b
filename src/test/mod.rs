use std::{
    collections::HashMap,
    sync::{Mutex, Once},
};

use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        friend::{
            model::{FriendRequestResponse, FriendUserRow},
            repository::FriendRequestRepository,
            schema::{FriendRequestEntity, FriendRequestStatus},
        },
        user::{
            model::{InsertUser, OnboardUser},
            repository::{RefreshTokenStore, UserRepository},
            schema::UserEntity,
        },
    },
    utils::{Claims, TypeClaims},
    ENV,
};


static INIT: Once = Once::new();

/// Fills the variables `Env` insists on, then forces it.
pub fn init_env() {
    INIT.call_once(|| {
        for (key, value) in [
            ("SECRET_KEY", "test-secret-key"),
            ("DATABASE_URL", "postgres://localhost/unused"),
            ("REDIS_URL", "redis://localhost/"),
        ] {
            if std::env::var(key).is_err() {
                std::env::set_var(key, value);
            }
        }
    });
    std::sync::LazyLock::force(&ENV);
}

pub fn access_token(user_id: Uuid) -> String {
    init_env();
    Claims::new(&user_id, 3600)
        .with_type(TypeClaims::AccessToken)
        .encode(ENV.jwt_secret.as_ref())
        .unwrap()
}

fn new_id() -> Uuid {
    Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext))
}

#[derive(Default)]
struct State {
    users: Vec<UserEntity>,
    // directed memberships, in insertion order
    friends: Vec<(Uuid, Uuid)>,
    requests: Vec<FriendRequestEntity>,
    tokens: HashMap<Uuid, Uuid>,
    conflict_on_create: bool,
}

/// In-memory user directory, request ledger and refresh-token store.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

pub fn onboarded_user(store: &MemoryStore, name: &str) -> Uuid {
    store.insert_user(name, true)
}

impl MemoryStore {
    pub fn insert_user(&self, name: &str, onboarded: bool) -> Uuid {
        let now = chrono::Utc::now();
        let user = UserEntity {
            id: new_id(),
            email: format!("{}@example.com", name.to_lowercase()),
            hash_password: String::new(),
            full_name: name.to_string(),
            bio: String::new(),
            native_language: if onboarded { "english".into() } else { String::new() },
            learning_language: if onboarded { "spanish".into() } else { String::new() },
            location: String::new(),
            profile_pic: String::new(),
            is_onboarded: onboarded,
            created_at: now,
            updated_at: now,
        };
        let id = user.id;
        self.state.lock().unwrap().users.push(user);
        id
    }

    pub fn friends_of(&self, user_id: Uuid) -> Vec<Uuid> {
        let state = self.state.lock().unwrap();
        state.friends.iter().filter(|(u, _)| *u == user_id).map(|(_, f)| *f).collect()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn fail_next_create_with_conflict(&self) {
        self.state.lock().unwrap().conflict_on_create = true;
    }
}

fn conflict(constraint: &str) -> error::SystemError {
    error::SystemError::Conflict(Some(error::DbErrorMeta { constraint: Some(constraint.into()) }))
}

fn involves(request: &FriendRequestEntity, a: &Uuid, b: &Uuid) -> bool {
    (request.sender_id == *a && request.recipient_id == *b)
        || (request.sender_id == *b && request.recipient_id == *a)
}

fn joined_row(state: &State, request: &FriendRequestEntity, user_id: &Uuid) -> Option<FriendUserRow> {
    let user = state.users.iter().find(|u| u.id == *user_id)?;
    Some(FriendUserRow {
        req_id: request.id,
        status: request.status,
        created_at: request.created_at,
        user_id: user.id,
        full_name: user.full_name.clone(),
        profile_pic: user.profile_pic.clone(),
        native_language: user.native_language.clone(),
        learning_language: user.learning_language.clone(),
    })
}

#[async_trait::async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.email.eq_ignore_ascii_case(email)).cloned())
    }

    async fn create(&self, user: &InsertUser) -> Result<UserEntity, error::SystemError> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(conflict("uq_users_email"));
        }
        let now = chrono::Utc::now();
        let entity = UserEntity {
            id: new_id(),
            email: user.email.clone(),
            hash_password: user.hash_password.clone(),
            full_name: user.full_name.clone(),
            bio: String::new(),
            native_language: String::new(),
            learning_language: String::new(),
            location: String::new(),
            profile_pic: user.profile_pic.clone(),
            is_onboarded: false,
            created_at: now,
            updated_at: now,
        };
        state.users.push(entity.clone());
        Ok(entity)
    }

    async fn onboard(
        &self,
        id: &Uuid,
        profile: &OnboardUser,
    ) -> Result<UserEntity, error::SystemError> {
        let mut state = self.state.lock().unwrap();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == *id)
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        user.full_name = profile.full_name.clone();
        user.bio = profile.bio.clone();
        user.native_language = profile.native_language.clone();
        user.learning_language = profile.learning_language.clone();
        user.location = profile.location.clone();
        if let Some(pic) = &profile.profile_pic {
            user.profile_pic = pic.clone();
        }
        user.is_onboarded = true;
        user.updated_at = chrono::Utc::now();
        Ok(user.clone())
    }

    async fn find_onboarded_excluding(
        &self,
        excluded: &[Uuid],
    ) -> Result<Vec<UserEntity>, error::SystemError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .filter(|u| u.is_onboarded && !excluded.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn find_friend_ids(&self, user_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError> {
        Ok(self.friends_of(*user_id))
    }

    async fn find_friends(&self, user_id: &Uuid) -> Result<Vec<UserEntity>, error::SystemError> {
        let ids = self.friends_of(*user_id);
        let state = self.state.lock().unwrap();
        Ok(ids.iter().filter_map(|id| state.users.iter().find(|u| u.id == *id).cloned()).collect())
    }

    async fn is_friend(
        &self,
        user_id: &Uuid,
        friend_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let state = self.state.lock().unwrap();
        Ok(state.friends.contains(&(*user_id, *friend_id)))
    }
}

#[async_trait::async_trait]
impl FriendRequestRepository for MemoryStore {
    async fn find_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError> {
        let state = self.state.lock().unwrap();
        Ok(state.requests.iter().find(|r| involves(r, user_id_a, user_id_b)).cloned())
    }

    async fn find_by_id(
        &self,
        request_id: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError> {
        let state = self.state.lock().unwrap();
        Ok(state.requests.iter().find(|r| r.id == *request_id).cloned())
    }

    async fn find_to_user(
        &self,
        user_id: &Uuid,
        status: FriendRequestStatus,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .requests
            .iter()
            .filter(|r| r.recipient_id == *user_id && r.status == status)
            .filter_map(|r| joined_row(&state, r, &r.sender_id))
            .map(|row| row.into_incoming(*user_id))
            .collect())
    }

    async fn find_from_user(
        &self,
        user_id: &Uuid,
        status: FriendRequestStatus,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .requests
            .iter()
            .filter(|r| r.sender_id == *user_id && r.status == status)
            .filter_map(|r| joined_row(&state, r, &r.recipient_id))
            .map(|row| row.into_outgoing(*user_id))
            .collect())
    }

    async fn create(
        &self,
        sender_id: &Uuid,
        recipient_id: &Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        let mut state = self.state.lock().unwrap();
        if std::mem::take(&mut state.conflict_on_create) {
            return Err(conflict("uq_friend_requests_pair"));
        }
        let now = chrono::Utc::now();
        let request = FriendRequestEntity {
            id: new_id(),
            sender_id: *sender_id,
            recipient_id: *recipient_id,
            status: FriendRequestStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        state.requests.push(request.clone());
        Ok(request)
    }

    async fn accept(&self, request_id: &Uuid) -> Result<FriendRequestEntity, error::SystemError> {
        let mut state = self.state.lock().unwrap();
        let request = state
            .requests
            .iter_mut()
            .find(|r| r.id == *request_id)
            .ok_or_else(|| error::SystemError::not_found("Friend Request not found"))?;

        request.status = FriendRequestStatus::Accepted;
        request.updated_at = chrono::Utc::now();
        let accepted = request.clone();

        for pair in [
            (accepted.sender_id, accepted.recipient_id),
            (accepted.recipient_id, accepted.sender_id),
        ] {
            if !state.friends.contains(&pair) {
                state.friends.push(pair);
            }
        }
        Ok(accepted)
    }

    async fn delete_pending(&self, request_id: &Uuid) -> Result<bool, error::SystemError> {
        let mut state = self.state.lock().unwrap();
        let before = state.requests.len();
        state
            .requests
            .retain(|r| !(r.id == *request_id && r.status == FriendRequestStatus::Pending));
        Ok(state.requests.len() < before)
    }
}

#[async_trait::async_trait]
impl RefreshTokenStore for MemoryStore {
    async fn save(
        &self,
        jti: &Uuid,
        user_id: &Uuid,
        _ttl_secs: u64,
    ) -> Result<(), error::SystemError> {
        self.state.lock().unwrap().tokens.insert(*jti, *user_id);
        Ok(())
    }

    async fn take(&self, jti: &Uuid) -> Result<Option<Uuid>, error::SystemError> {
        Ok(self.state.lock().unwrap().tokens.remove(jti))
    }

    async fn revoke(&self, jti: &Uuid) -> Result<(), error::SystemError> {
        self.state.lock().unwrap().tokens.remove(jti);
        Ok(())
    }
}
