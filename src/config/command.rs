use std::path::PathBuf;

use clap::Subcommand;

use crate::{model::PostId, route::Route};

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long = "confirm-password")]
        confirm_password: String,
    },
    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show who is signed in
    Whoami,
    /// List every post
    Posts,
    /// List your own posts
    Mine,
    /// Publish a new post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Image to upload (jpg, png, webp or gif, up to 5MB)
        #[arg(long)]
        image: PathBuf,
    },
    /// Edit one of your posts
    Edit {
        id: PostId,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Replacement image, the current one is kept if omitted
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Delete one of your posts
    Delete { id: PostId },
    /// Visit a page by path (`/`, `/login`, `/register`, `/myBlogs`)
    Open { route: Route },
}

impl Command {
    /// The page this command belongs to.
    pub fn route(&self) -> Route {
        match self {
            Self::Register { .. } => Route::Register,
            Self::Login { .. } => Route::Login,
            Self::Mine | Self::Edit { .. } | Self::Delete { .. } => Route::MyBlogs,
            Self::Open { route } => *route,
            Self::Logout | Self::Whoami | Self::Posts | Self::Create { .. } => Route::Home,
        }
    }
}
