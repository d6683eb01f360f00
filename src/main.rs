use std::{error::Error, process::ExitCode};

use blog_client::{
    api::BlogClient,
    auth::{self, AuthError},
    config::{Command, Config},
    model::{EditDraft, LoginForm, PostDraft, RegisterForm},
    post::{display_posts, image::ImageFile, BlogView, DeleteOutcome, ViewError},
    prompt::{LogNotifier, StdinConfirm},
    route::Route,
    session::SessionStore,
    validate::FormErrors,
};
use log::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    config.init_logger();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(e.as_ref());
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), Box<dyn Error>> {
    let mut session = SessionStore::load(config.session())?;
    let client = BlogClient::new(&config);
    let mut notify = LogNotifier;
    let assume_yes = config.assume_yes();

    let route = config.command.route();
    let landed = route.guard(&session);
    if landed != route {
        if let Some(user) = session.user() {
            info!("Already signed in as {}", user.name());
        }
        return show(&client, &session, landed).await;
    }

    match config.command {
        Command::Register {
            name,
            email,
            password,
            confirm_password,
        } => {
            let form = RegisterForm {
                name,
                email,
                password,
                confirm_password,
            };
            let next = auth::register(&client, &form).await?;
            info!("Account created, please sign in");
            show(&client, &session, next).await?;
        }
        Command::Login { email, password } => {
            let form = LoginForm { email, password };
            let next = auth::login(&client, &mut session, &form).await?;
            show(&client, &session, next).await?;
        }
        Command::Logout => {
            if !session.is_authenticated() {
                info!("Not signed in");
                return Ok(());
            }
            auth::logout(&client, &mut session).await?;
            info!("Signed out");
        }
        Command::Whoami => match session.user() {
            Some(user) => {
                let since = session
                    .logged_in_at()
                    .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                info!("{} <{}> (id {}, since {})", user.name, user.email, user.id, since);
            }
            None => info!("Not signed in"),
        },
        Command::Posts => show(&client, &session, Route::Home).await?,
        Command::Mine => show(&client, &session, Route::MyBlogs).await?,
        Command::Open { route } => show(&client, &session, route).await?,
        Command::Create {
            title,
            description,
            image,
        } => {
            if !session.is_authenticated() {
                warn!("Log in at {} first", Route::Login);
                return Err(ViewError::LoginRequired.into());
            }
            let draft = PostDraft {
                title,
                description,
                image: Some(ImageFile::open(&image).await?),
            };

            let mut view = BlogView::home(client.clone());
            view.load().await?;
            view.create(&session, draft, &mut notify).await?;
            display_posts(view.posts());
        }
        Command::Edit {
            id,
            title,
            description,
            image,
        } => {
            let image = match image {
                Some(path) => Some(ImageFile::open(&path).await?),
                None => None,
            };
            let draft = EditDraft {
                title,
                description,
                image,
            };

            let mut view = my_blogs(&client, &session)?;
            view.load().await?;
            view.edit(&id, draft, &mut notify).await?;
            display_posts(view.posts());
        }
        Command::Delete { id } => {
            let mut view = my_blogs(&client, &session)?;
            view.load().await?;
            let mut confirm = StdinConfirm::new(assume_yes);
            match view.delete(&id, &mut confirm, &mut notify).await? {
                DeleteOutcome::Deleted => display_posts(view.posts()),
                DeleteOutcome::Cancelled => info!("Nothing was deleted"),
            }
        }
    }

    Ok(())
}

fn my_blogs(
    client: &BlogClient,
    session: &SessionStore,
) -> Result<BlogView<BlogClient>, Box<dyn Error>> {
    match session.user() {
        Some(user) => Ok(BlogView::mine(client.clone(), user.id().clone())),
        None => Err(format!("Log in at {} to manage your blogs", Route::Login).into()),
    }
}

/// Render the page a route points at.
async fn show(
    client: &BlogClient,
    session: &SessionStore,
    route: Route,
) -> Result<(), Box<dyn Error>> {
    match route {
        Route::Home => {
            let mut view = BlogView::home(client.clone());
            display_posts(view.load().await?);
        }
        Route::MyBlogs => match session.user() {
            Some(user) => {
                let mut view = BlogView::mine(client.clone(), user.id().clone());
                display_posts(view.load().await?);
            }
            None => {
                info!("No blogs found.");
                info!("Log in at {} to see your blogs", Route::Login);
            }
        },
        Route::Login => info!("Sign in with `blog login --email <EMAIL> --password <PASSWORD>`"),
        Route::Register => info!(
            "Sign up with `blog register --name <NAME> --email <EMAIL> --password <PASSWORD> --confirm-password <PASSWORD>`"
        ),
    }
    Ok(())
}

fn report(e: &(dyn Error + 'static)) {
    // the view has already shown these through its notifier
    if let Some(ViewError::Invalid(_) | ViewError::Api(_) | ViewError::Mismatch { .. }) =
        e.downcast_ref::<ViewError>()
    {
        return;
    }
    match e.downcast_ref::<AuthError>() {
        Some(AuthError::Invalid(fields)) => log_fields(fields),
        _ => error!("{}", e),
    }
}

fn log_fields(fields: &FormErrors) {
    for (field, message) in fields.iter() {
        error!("{}: {}", field, message);
    }
}
