use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    MyBlogs,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("no such page: {0}")]
pub struct RouteError(String);

impl Route {
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::MyBlogs => "/myBlogs",
        }
    }

    /// Pages only reachable while signed out.
    pub const fn guest_only(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// Where a visit to this route actually lands.
    pub fn guard(self, session: &SessionStore) -> Self {
        if self.guest_only() && session.is_authenticated() {
            Self::Home
        } else {
            self
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "/" | "" => Ok(Self::Home),
            "/login" => Ok(Self::Login),
            "/register" => Ok(Self::Register),
            "/myBlogs" => Ok(Self::MyBlogs),
            other => Err(RouteError(other.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.path())
    }
}
