//! In-memory doubles shared by unit tests.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use reqwest::StatusCode;

use crate::{
    api::{ApiError, BlogApi, ServerMessage},
    model::{EditDraft, LoginForm, Post, PostDraft, PostId, RegisterForm, User, UserId},
    post::image::ImageFile,
    prompt::{Confirm, Notify},
    session::SessionStore,
};

#[derive(Debug, Default)]
pub struct Backend {
    pub posts: Vec<Post>,
    pub users: Vec<(User, String)>,
    pub calls: Vec<String>,
    pub fail: Option<StatusCode>,
    pub field_error: Option<(String, String)>,
    next_id: u32,
}

/// Stand-in for the REST backend that records every call.
#[derive(Debug, Clone, Default)]
pub struct FakeApi(Arc<Mutex<Backend>>);

impl FakeApi {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        let api = Self::default();
        api.backend().posts = posts;
        api
    }

    pub fn with_user(user: User, password: &str) -> Self {
        let api = Self::default();
        api.backend().users.push((user, password.to_string()));
        api
    }

    pub fn backend(&self) -> MutexGuard<'_, Backend> {
        self.0.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<String> {
        self.backend().calls.clone()
    }

    pub fn fail_with(&self, status: StatusCode) {
        self.backend().fail = Some(status);
    }

    pub fn reject_field(&self, field: &str, message: &str) {
        self.backend().field_error = Some((field.into(), message.into()));
    }

    fn call(&self, name: String) -> Result<MutexGuard<'_, Backend>, ApiError> {
        let mut backend = self.backend();
        backend.calls.push(name);
        if let Some((field, message)) = backend.field_error.clone() {
            return Err(field_rejection(&field, &message));
        }
        if let Some(status) = backend.fail {
            return Err(ApiError::Status {
                status,
                body: String::new(),
            });
        }
        Ok(backend)
    }
}

fn field_rejection(field: &str, message: &str) -> ApiError {
    ApiError::Rejected {
        status: StatusCode::BAD_REQUEST,
        message: Some(ServerMessage::Fields(BTreeMap::from([(
            field.to_string(),
            message.to_string(),
        )]))),
    }
}

impl BlogApi for FakeApi {
    async fn register(&self, form: &RegisterForm) -> Result<(), ApiError> {
        let mut backend = self.call("register".into())?;
        if backend.users.iter().any(|(u, _)| u.email == form.email) {
            return Err(field_rejection("email", "Email already exists"));
        }
        let id = UserId::new(format!("user{}", backend.users.len() + 1));
        let user = User {
            id,
            name: form.name.clone(),
            email: form.email.clone(),
        };
        backend.users.push((user, form.password.clone()));
        Ok(())
    }

    async fn login(&self, form: &LoginForm) -> Result<User, ApiError> {
        let backend = self.call("login".into())?;
        match backend.users.iter().find(|(u, _)| u.email == form.email) {
            Some((user, password)) if *password == form.password => Ok(user.clone()),
            Some(_) => Err(field_rejection("password", "Incorrect password")),
            None => Err(field_rejection("email", "User not found")),
        }
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.call("logout".into()).map(|_| ())
    }

    async fn create_post(&self, draft: &PostDraft, owner: &UserId) -> Result<Post, ApiError> {
        let mut backend = self.call("create".into())?;
        backend.next_id += 1;
        let post = Post {
            id: PostId::new(format!("new{}", backend.next_id)),
            title: draft.title.clone(),
            description: draft.description.clone(),
            image: "http://img/new.png".into(),
            user_id: owner.clone(),
        };
        backend.posts.insert(0, post.clone());
        Ok(post)
    }

    async fn get_posts(&self) -> Result<Vec<Post>, ApiError> {
        Ok(self.call("list".into())?.posts.clone())
    }

    async fn get_posts_by_user(&self, owner: &UserId) -> Result<Vec<Post>, ApiError> {
        let backend = self.call(format!("list {owner}"))?;
        Ok(backend
            .posts
            .iter()
            .filter(|p| &p.user_id == owner)
            .cloned()
            .collect())
    }

    async fn delete_post(&self, id: &PostId) -> Result<(), ApiError> {
        let mut backend = self.call(format!("delete {id}"))?;
        backend.posts.retain(|p| &p.id != id);
        Ok(())
    }

    async fn update_post(&self, id: &PostId, draft: &EditDraft) -> Result<Post, ApiError> {
        let mut backend = self.call(format!("update {id}"))?;
        let post = backend
            .posts
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or(ApiError::MissingData)?;
        post.title = draft.title.clone();
        post.description = draft.description.clone();
        if draft.image.is_some() {
            post.image = format!("http://img/{id}-v2.png");
        }
        Ok(post.clone())
    }
}

/// Collects notifications instead of showing them.
#[derive(Debug, Default)]
pub struct Recorder {
    pub successes: Vec<String>,
    pub failures: Vec<String>,
}

impl Notify for Recorder {
    fn success(&mut self, message: &str) {
        self.successes.push(message.to_string());
    }
    fn failure(&mut self, message: &str) {
        self.failures.push(message.to_string());
    }
}

/// Gives the same answer every time and counts how often it was asked.
pub struct Answer(pub bool, pub usize);

impl Confirm for Answer {
    fn confirm(&mut self, _question: &str) -> bool {
        self.1 += 1;
        self.0
    }
}

pub fn jane() -> User {
    User {
        id: "u1".into(),
        name: "Jane".into(),
        email: "jane@example.com".into(),
    }
}

pub fn post(id: &str, owner: &str) -> Post {
    Post {
        id: id.into(),
        title: format!("Post {id}"),
        description: "a".repeat(40),
        image: format!("http://img/{id}.png"),
        user_id: owner.into(),
    }
}

pub fn signed_in() -> SessionStore {
    let mut session = SessionStore::in_memory();
    session.login(jane()).unwrap();
    session
}

pub fn draft() -> PostDraft {
    PostDraft {
        title: "Fresh".into(),
        description: "Something worth reading, really.".into(),
        image: Some(ImageFile::new("cover.png", vec![0; 64])),
    }
}
