use log::debug;
use reqwest::{
    header,
    multipart::{Form, Part},
    RequestBuilder,
};
use serde_json::Value;
use url::Url;

use crate::{
    config::Config,
    model::{EditDraft, LoginForm, Post, PostDraft, PostId, RegisterForm, User, UserId},
    post::image::ImageFile,
};

use super::{ApiClient, ApiError, BlogApi};

pub const REGISTER: &str = "/api/register";
pub const LOGIN: &str = "/api/login";
pub const LOGOUT: &str = "/api/logout";
pub const CREATE_BLOG: &str = "/api/createBlog";
pub const GET_ALL_BLOGS: &str = "/api/getAllBlogs";
pub const GET_ALL_BLOGS_BY_USER: &str = "/api/getAllBlogsByUser";
pub const DELETE_BLOG: &str = "/api/deleteBlog";
pub const UPDATE_BLOG: &str = "/api/updateBlog";

#[derive(Debug, Clone)]
pub struct BlogClient {
    inner: ApiClient,
}

impl BlogClient {
    pub fn new(config: &Config) -> Self {
        Self::with_base(config.server().clone())
    }

    pub fn with_base(base: Url) -> Self {
        Self {
            inner: ApiClient::new(base),
        }
    }

    fn wrap_request(&self, builder: RequestBuilder) -> RequestBuilder {
        const USER_AGENT: &str = concat!("blog-client/", env!("CARGO_PKG_VERSION"));
        builder
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, USER_AGENT)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.inner.url(path)?;
        debug!("{} {}", method, url);
        Ok(self.wrap_request(self.inner.client().request(method, url)))
    }

    /// `{path}/{id}` with the id percent-encoded.
    fn with_id(path: &str, id: &str) -> String {
        format!("{}/{}", path, urlencoding::encode(id))
    }

    fn image_part(image: &ImageFile) -> Result<Part, ApiError> {
        Ok(Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)?)
    }

    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        self.inner
            .send::<T>(request)
            .await?
            .data
            .ok_or(ApiError::MissingData)
    }

    async fn acknowledge(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.inner.send::<Value>(request).await?;
        Ok(())
    }
}

impl BlogApi for BlogClient {
    async fn register(&self, form: &RegisterForm) -> Result<(), ApiError> {
        let request = self.request(reqwest::Method::POST, REGISTER)?.json(form);
        self.acknowledge(request).await
    }

    async fn login(&self, form: &LoginForm) -> Result<User, ApiError> {
        let request = self.request(reqwest::Method::POST, LOGIN)?.json(form);
        self.fetch(request).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let request = self.request(reqwest::Method::POST, LOGOUT)?;
        self.acknowledge(request).await
    }

    async fn create_post(&self, draft: &PostDraft, owner: &UserId) -> Result<Post, ApiError> {
        let mut form = Form::new()
            .text("title", draft.title.clone())
            .text("description", draft.description.clone())
            .text("userId", owner.to_string());
        if let Some(image) = &draft.image {
            form = form.part("image", Self::image_part(image)?);
        }

        let request = self
            .request(reqwest::Method::POST, CREATE_BLOG)?
            .multipart(form);
        self.fetch(request).await
    }

    async fn get_posts(&self) -> Result<Vec<Post>, ApiError> {
        let request = self.request(reqwest::Method::GET, GET_ALL_BLOGS)?;
        self.fetch(request).await
    }

    async fn get_posts_by_user(&self, owner: &UserId) -> Result<Vec<Post>, ApiError> {
        let path = Self::with_id(GET_ALL_BLOGS_BY_USER, owner.as_str());
        let request = self.request(reqwest::Method::GET, &path)?;
        self.fetch(request).await
    }

    async fn delete_post(&self, id: &PostId) -> Result<(), ApiError> {
        let path = Self::with_id(DELETE_BLOG, id.as_str());
        let request = self.request(reqwest::Method::DELETE, &path)?;
        self.acknowledge(request).await
    }

    async fn update_post(&self, id: &PostId, draft: &EditDraft) -> Result<Post, ApiError> {
        let mut form = Form::new()
            .text("blogId", id.to_string())
            .text("title", draft.title.clone())
            .text("description", draft.description.clone());
        if let Some(image) = &draft.image {
            form = form.part("image", Self::image_part(image)?);
        }

        let request = self
            .request(reqwest::Method::PUT, UPDATE_BLOG)?
            .multipart(form);
        self.fetch(request).await
    }
}
