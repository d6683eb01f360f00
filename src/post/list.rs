use std::collections::{HashMap, VecDeque};

use crate::model::{Post, PostId};

/// Posts keyed by id, remembering the order they are shown in.
#[derive(Debug, Clone, Default)]
pub struct PostList {
    order: VecDeque<PostId>,
    posts: HashMap<PostId, Post>,
}

impl PostList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &PostId) -> bool {
        self.posts.contains_key(id)
    }

    pub fn get(&self, id: &PostId) -> Option<&Post> {
        self.posts.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Post> {
        self.order.iter().filter_map(|id| self.posts.get(id))
    }

    /// Put a post at the top. A post already present is replaced where it stands.
    pub fn prepend(&mut self, post: Post) {
        if let Some(existing) = self.posts.get_mut(&post.id) {
            *existing = post;
            return;
        }
        self.order.push_front(post.id.clone());
        self.posts.insert(post.id.clone(), post);
    }

    /// Swap in the canonical copy of a post that is already listed.
    pub fn replace(&mut self, post: Post) -> Result<&Post, Post> {
        match self.posts.get_mut(&post.id) {
            Some(existing) => {
                *existing = post;
                Ok(existing)
            }
            None => Err(post),
        }
    }

    pub fn remove(&mut self, id: &PostId) -> Option<Post> {
        let post = self.posts.remove(id)?;
        self.order.retain(|listed| listed != id);
        Some(post)
    }
}

impl FromIterator<Post> for PostList {
    /// Later duplicates of an id are dropped.
    fn from_iter<I: IntoIterator<Item = Post>>(iter: I) -> Self {
        let mut list = Self::new();
        for post in iter {
            if list.contains(&post.id) {
                continue;
            }
            list.order.push_back(post.id.clone());
            list.posts.insert(post.id.clone(), post);
        }
        list
    }
}
