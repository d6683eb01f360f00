use log::{error, info};
use thiserror::Error;

use crate::{
    api::{ApiError, BlogApi},
    model::{LoginForm, RegisterForm},
    route::Route,
    session::{SessionError, SessionStore},
    validate::{validate_login, validate_register, FormErrors},
};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Invalid(FormErrors),
    #[error(transparent)]
    Api(ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl From<ApiError> for AuthError {
    fn from(error: ApiError) -> Self {
        match error.field_errors() {
            Some(fields) => Self::Invalid(fields),
            None => Self::Api(error),
        }
    }
}

/// Create an account. On success the user is sent to the login page.
pub async fn register(api: &impl BlogApi, form: &RegisterForm) -> Result<Route, AuthError> {
    validate_register(form).map_err(AuthError::Invalid)?;

    let form = RegisterForm {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        password: form.password.trim().to_string(),
        confirm_password: String::new(),
    };
    api.register(&form).await?;
    info!("Registered {}", form.email);
    Ok(Route::Login)
}

/// Sign in and remember the user. The session is untouched on failure.
pub async fn login(
    api: &impl BlogApi,
    session: &mut SessionStore,
    form: &LoginForm,
) -> Result<Route, AuthError> {
    validate_login(form).map_err(AuthError::Invalid)?;

    let form = LoginForm {
        email: form.email.trim().to_string(),
        password: form.password.trim().to_string(),
    };
    let user = api.login(&form).await?;
    info!("Signed in as {}", user.name);
    session.login(user)?;
    Ok(Route::Home)
}

/// Sign out. The local session is cleared even if the backend call fails.
pub async fn logout(api: &impl BlogApi, session: &mut SessionStore) -> Result<(), AuthError> {
    let result = api.logout().await;
    session.logout()?;
    if let Err(e) = result {
        error!("Backend logout failed: {}", e);
        return Err(e.into());
    }
    Ok(())
}
