use serde::{Deserialize, Serialize};

use super::{PostId, UserId};
use crate::post::image::ImageFile;

/// Canonical blog post as stored by the backend.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: PostId,
    pub title: String,
    pub description: String,
    /// URL of the uploaded image
    pub image: String,
    pub user_id: UserId,
}

impl Post {
    pub fn id(&self) -> &PostId {
        &self.id
    }
    pub fn owner(&self) -> &UserId {
        &self.user_id
    }
    /// First 150 characters of the description, as shown in listings.
    pub fn excerpt(&self) -> String {
        let mut excerpt: String = self.description.chars().take(150).collect();
        if excerpt.len() < self.description.len() {
            excerpt.push_str("...");
        }
        excerpt
    }
}

/// Form data for a new post.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub description: String,
    pub image: Option<ImageFile>,
}

impl PostDraft {
    /// The draft as it is sent: title and description trimmed.
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            image: self.image,
        }
    }
}

/// Form data for editing an existing post. Without an image the stored one is kept.
#[derive(Debug, Clone, Default)]
pub struct EditDraft {
    pub title: String,
    pub description: String,
    pub image: Option<ImageFile>,
}

impl EditDraft {
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            image: self.image,
        }
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub confirm_password: String,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_uses_backend_field_names() {
        let post: Post = serde_json::from_str(
            r#"{"_id":"p1","title":"Hello","description":"d","image":"http://img/1.png","userId":"u1","__v":0}"#,
        )
        .unwrap();
        assert_eq!(post.id, PostId::new("p1"));
        assert_eq!(post.user_id, UserId::new("u1"));
    }

    #[test]
    fn excerpt_truncates_long_descriptions() {
        let post = Post {
            id: "p".into(),
            title: "t".into(),
            description: "x".repeat(200),
            image: String::new(),
            user_id: "u".into(),
        };
        assert_eq!(post.excerpt().len(), 153);
        assert!(post.excerpt().ends_with("..."));
    }

    #[test]
    fn register_form_does_not_send_confirmation() {
        let form = RegisterForm {
            name: "alice".into(),
            email: "alice@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        };
        let value = serde_json::to_value(&form).unwrap();
        assert!(value.get("confirm_password").is_none());
        assert_eq!(value["name"], "alice");
    }
}
