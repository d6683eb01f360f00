pub mod image;
pub mod list;
pub mod view;

use log::info;

pub use list::PostList;
pub use view::{BlogView, DeleteOutcome, Scope, ViewError, ViewState};

pub fn display_posts(posts: &PostList) {
    if !log::log_enabled!(log::Level::Info) {
        return;
    }
    if posts.is_empty() {
        info!("No blogs found.");
        return;
    }

    let (mut id_width, mut title_width) = (4_usize, 7_usize);
    for post in posts.iter() {
        id_width = post.id.as_str().len().max(id_width);
        title_width = post.title.chars().count().max(title_width);
    }
    let title_width = title_width.min(48);

    info!(
        "+-{:-<id_width$}-+-{:-<title_width$}-+-{}------- - -",
        " Id ", " Title ", " Description "
    );
    for post in posts.iter() {
        let title: String = post.title.chars().take(title_width).collect();
        info!(
            "| {:id_width$} | {:title_width$} | {}",
            post.id,
            title,
            post.excerpt().replace('\n', " ")
        );
    }
    info!(
        "+-{}-+-{}-+------------ - -",
        "-".repeat(id_width),
        "-".repeat(title_width)
    );
    info!("{} posts", posts.len());
}
