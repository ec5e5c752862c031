use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::wire::{deserialize_id, deserialize_optional_text};

/// The signed-in member as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub email: String,
    #[serde(default, alias = "firstname", deserialize_with = "deserialize_optional_text")]
    pub first_name: Option<String>,
    #[serde(default, alias = "lastname", deserialize_with = "deserialize_optional_text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub role: Option<String>,
}

impl SessionUser {
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(name), None) | (None, Some(name)) => name.clone(),
            (None, None) => self.email.clone(),
        }
    }
}

/// Where session state lives between requests. Implementations must tolerate concurrent access.
pub trait SessionStore: Send + Sync {
    fn load_user(&self) -> Option<SessionUser>;
    fn save_user(&self, user: &SessionUser);
    fn clear_user(&self);
    fn remembered_email(&self) -> Option<String>;
    fn set_remembered_email(&self, email: Option<&str>);
}

#[derive(Debug, Default)]
struct StoredSession {
    user: Option<SessionUser>,
    remembered_email: Option<String>,
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    inner: Mutex<StoredSession>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load_user(&self) -> Option<SessionUser> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .user
            .clone()
    }

    fn save_user(&self, user: &SessionUser) {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).user = Some(user.clone());
    }

    fn clear_user(&self) {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).user = None;
    }

    fn remembered_email(&self) -> Option<String> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remembered_email
            .clone()
    }

    fn set_remembered_email(&self, email: Option<&str>) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remembered_email = email.map(str::to_string);
    }
}

/// Explicit auth context: load with [`AuthSession::init`], then `login`/`logout`.
#[derive(Debug)]
pub struct AuthSession<S> {
    store: S,
    user: Option<SessionUser>,
}

impl<S: SessionStore> AuthSession<S> {
    pub fn new(store: S) -> Self {
        Self { store, user: None }
    }

    /// Restore whatever the store holds.
    pub fn init(&mut self) -> Option<&SessionUser> {
        self.user = self.store.load_user();
        self.user.as_ref()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Persist the user. With `remember_me` the email is kept for the next login form,
    /// otherwise any previously remembered email is forgotten.
    pub fn login(&mut self, user: SessionUser, remember_me: bool) {
        self.store.save_user(&user);
        let remembered = remember_me.then_some(user.email.as_str());
        self.store.set_remembered_email(remembered);
        tracing::info!(user_id = %user.id, remember_me, "session started");
        self.user = Some(user);
    }

    /// Clears the user; the remembered email survives logout.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = %user.id, "session ended");
        }
        self.store.clear_user();
    }

    pub fn remembered_email(&self) -> Option<String> {
        self.store.remembered_email()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
