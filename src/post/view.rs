use log::{debug, error, info};
use thiserror::Error;

use crate::{
    api::{ApiError, BlogApi},
    model::{EditDraft, Post, PostDraft, PostId, UserId},
    prompt::{Confirm, Notify},
    session::SessionStore,
    validate::{validate_edit, validate_post, FormErrors},
};

use super::list::PostList;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Please log in to create a blog")]
    LoginRequired,
    #[error("{0}")]
    Invalid(FormErrors),
    #[error("post {0} is not in this list")]
    NotFound(PostId),
    #[error("posts have not been loaded yet")]
    NotLoaded,
    #[error("update of post {requested} returned post {returned}")]
    Mismatch { requested: PostId, returned: PostId },
    #[error(transparent)]
    Api(ApiError),
}

impl From<ApiError> for ViewError {
    fn from(error: ApiError) -> Self {
        match error.field_errors() {
            Some(fields) => Self::Invalid(fields),
            None => Self::Api(error),
        }
    }
}

/// Which posts a view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Every post (home page)
    All,
    /// Posts written by one user (my blogs)
    Owner(UserId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

/// A list of posts kept in step with the backend.
///
/// The list is fetched once. Afterwards only mutations the server has
/// accepted change it, using the canonical post the server sends back.
#[derive(Debug)]
pub struct BlogView<A> {
    api: A,
    scope: Scope,
    state: ViewState,
    posts: PostList,
}

impl<A: BlogApi> BlogView<A> {
    pub fn new(api: A, scope: Scope) -> Self {
        Self {
            api,
            scope,
            state: ViewState::Idle,
            posts: PostList::new(),
        }
    }

    pub fn home(api: A) -> Self {
        Self::new(api, Scope::All)
    }

    pub fn mine(api: A, owner: UserId) -> Self {
        Self::new(api, Scope::Owner(owner))
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn posts(&self) -> &PostList {
        &self.posts
    }

    pub async fn load(&mut self) -> Result<&PostList, ApiError> {
        if self.state == ViewState::Ready {
            return Ok(&self.posts);
        }

        self.state = ViewState::Loading;
        let result = match &self.scope {
            Scope::All => self.api.get_posts().await,
            Scope::Owner(owner) => self.api.get_posts_by_user(owner).await,
        };

        match result {
            Ok(posts) => {
                self.posts = posts.into_iter().collect();
                self.state = ViewState::Ready;
                debug!("Loaded {} posts", self.posts.len());
                Ok(&self.posts)
            }
            Err(e) => {
                self.state = ViewState::Idle;
                error!("Failed to load posts: {}", e);
                Err(e)
            }
        }
    }

    pub async fn create(
        &mut self,
        session: &SessionStore,
        draft: PostDraft,
        notify: &mut impl Notify,
    ) -> Result<&Post, ViewError> {
        let owner = session.user().ok_or(ViewError::LoginRequired)?.id().clone();
        self.ensure_loaded()?;
        if let Err(fields) = validate_post(&draft) {
            return Err(Self::reject(notify, fields));
        }
        let draft = draft.trimmed();

        match self.api.create_post(&draft, &owner).await {
            Ok(post) => {
                info!("Created post {}", post.id);
                notify.success("Your blog created");
                let id = post.id.clone();
                self.posts.prepend(post);
                self.posts.get(&id).ok_or(ViewError::NotFound(id))
            }
            Err(e) => Err(Self::report(notify, "create", e)),
        }
    }

    pub async fn edit(
        &mut self,
        id: &PostId,
        draft: EditDraft,
        notify: &mut impl Notify,
    ) -> Result<&Post, ViewError> {
        self.ensure_loaded()?;
        if !self.posts.contains(id) {
            return Err(ViewError::NotFound(id.clone()));
        }
        if let Err(fields) = validate_edit(&draft) {
            return Err(Self::reject(notify, fields));
        }
        let draft = draft.trimmed();

        let post = match self.api.update_post(id, &draft).await {
            Ok(post) => post,
            Err(e) => return Err(Self::report(notify, "update", e)),
        };

        if post.id != *id {
            error!("Update of blog {} returned blog {}", id, post.id);
            notify.failure("Could not update the blog, please try again");
            return Err(ViewError::Mismatch {
                requested: id.clone(),
                returned: post.id,
            });
        }
        notify.success("Blog Updated Successfully");
        self.posts
            .replace(post)
            .map_err(|post| ViewError::NotFound(post.id))
    }

    pub async fn delete(
        &mut self,
        id: &PostId,
        confirm: &mut impl Confirm,
        notify: &mut impl Notify,
    ) -> Result<DeleteOutcome, ViewError> {
        self.ensure_loaded()?;
        if !self.posts.contains(id) {
            return Err(ViewError::NotFound(id.clone()));
        }
        if !confirm.confirm("Are you sure you want to delete?") {
            debug!("Delete of {} cancelled", id);
            return Ok(DeleteOutcome::Cancelled);
        }

        match self.api.delete_post(id).await {
            Ok(()) => {
                self.posts.remove(id);
                notify.success("Blog deleted");
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => Err(Self::report(notify, "delete", e)),
        }
    }

    fn ensure_loaded(&self) -> Result<(), ViewError> {
        match self.state {
            ViewState::Ready => Ok(()),
            _ => Err(ViewError::NotLoaded),
        }
    }

    fn reject(notify: &mut impl Notify, fields: FormErrors) -> ViewError {
        notify.failure(&fields.to_string());
        ViewError::Invalid(fields)
    }

    fn report(notify: &mut impl Notify, action: &str, error: ApiError) -> ViewError {
        error!("Failed to {} blog: {}", action, error);
        let error = ViewError::from(error);
        match &error {
            ViewError::Invalid(fields) => notify.failure(&fields.to_string()),
            _ => notify.failure(&format!("Could not {} the blog, please try again", action)),
        }
        error
    }
}
