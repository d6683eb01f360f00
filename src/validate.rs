//! Form validation

use std::{collections::BTreeMap, fmt, sync::OnceLock};

use regex::Regex;

use crate::{
    model::{EditDraft, LoginForm, PostDraft, RegisterForm},
    post::image::ImageFile,
};

pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;
pub const ACCEPTED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/gif",
];
pub const DESCRIPTION_MIN: usize = 20;
pub const DESCRIPTION_MAX: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
    Title,
    Description,
    Image,
    Other(String),
}

impl Field {
    /// Name of the field on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
            Self::Title => "title",
            Self::Description => "description",
            Self::Image => "image",
            Self::Other(name) => name,
        }
    }

    pub fn from_wire(name: &str) -> Self {
        match name {
            "name" => Self::Name,
            "email" => Self::Email,
            "password" => Self::Password,
            "confirmPassword" => Self::ConfirmPassword,
            "title" => Self::Title,
            "description" => Self::Description,
            "image" => Self::Image,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level messages, at most one per field, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<(Field, String)>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message unless the field already has one.
    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        if self.get(&field).is_none() {
            self.0.push((field, message.into()));
        }
    }

    pub fn get(&self, field: &Field) -> Option<&str> {
        self.0
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.0.iter().map(|(field, _)| field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Field, &str)> {
        self.0.iter().map(|(field, message)| (field, message.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Map a server `{field: message}` object back onto form fields.
    pub fn from_server(messages: &BTreeMap<String, String>) -> Self {
        let mut errors = Self::new();
        for (field, message) in messages {
            errors.push(Field::from_wire(field), message.clone());
        }
        errors
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

pub fn validate_post(draft: &PostDraft) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();
    check_title(&mut errors, &draft.title);
    check_description(&mut errors, &draft.description);
    match &draft.image {
        Some(image) => check_image(&mut errors, image),
        None => errors.push(Field::Image, "Image is required"),
    }
    errors.into_result()
}

pub fn validate_edit(draft: &EditDraft) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();
    check_title(&mut errors, &draft.title);
    check_description(&mut errors, &draft.description);
    if let Some(image) = &draft.image {
        check_image(&mut errors, image);
    }
    errors.into_result()
}

pub fn validate_register(form: &RegisterForm) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();

    let name = form.name.trim();
    let name_len = name.chars().count();
    if name.is_empty() {
        errors.push(Field::Name, "Username cannot be empty");
    } else if name_len < 3 {
        errors.push(Field::Name, "Username must not be less than 3 characters");
    } else if name_len > 25 {
        errors.push(Field::Name, "Username must not be greater than 25 characters");
    } else if !username_regex().is_match(name) {
        errors.push(
            Field::Name,
            "The username must contain only letters, numbers, spaces, and underscores (_)",
        );
    }

    check_email(&mut errors, form.email.trim());

    let password = form.password.trim();
    let password_len = password.chars().count();
    if password.is_empty() {
        errors.push(Field::Password, "Password cannot be empty");
    } else if password_len < 6 {
        errors.push(Field::Password, "Password must not be less than 6 characters");
    } else if password_len > 16 {
        errors.push(
            Field::Password,
            "Password must not be greater than 16 characters",
        );
    } else if password.chars().any(char::is_whitespace) {
        errors.push(Field::Password, "Password cannot contain spaces");
    }

    let confirm = form.confirm_password.trim();
    if confirm.is_empty() {
        errors.push(Field::ConfirmPassword, "Please confirm your password");
    } else if confirm != password {
        errors.push(Field::ConfirmPassword, "Passwords don't match");
    }

    errors.into_result()
}

pub fn validate_login(form: &LoginForm) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();
    check_email(&mut errors, form.email.trim());

    let password = form.password.trim();
    if password.is_empty() {
        errors.push(Field::Password, "Password cannot be empty");
    } else if password.chars().count() < 3 {
        errors.push(Field::Password, "Password must be at least 3 characters long");
    }

    errors.into_result()
}

fn check_title(errors: &mut FormErrors, title: &str) {
    if title.trim().is_empty() {
        errors.push(Field::Title, "Title is required");
    }
}

fn check_description(errors: &mut FormErrors, description: &str) {
    let len = description.trim().chars().count();
    if len < DESCRIPTION_MIN {
        errors.push(
            Field::Description,
            format!("Description must be at least {} characters", DESCRIPTION_MIN),
        );
    } else if len > DESCRIPTION_MAX {
        errors.push(
            Field::Description,
            format!("Description must not exceed {} characters", DESCRIPTION_MAX),
        );
    }
}

fn check_image(errors: &mut FormErrors, image: &ImageFile) {
    if image.size() > MAX_IMAGE_SIZE {
        errors.push(Field::Image, "Max file size is 5MB");
    } else if !ACCEPTED_IMAGE_TYPES.contains(&image.mime.as_str()) {
        errors.push(
            Field::Image,
            "Only .jpg, .jpeg, .png, .webp, and .gif formats are supported",
        );
    }
}

fn check_email(errors: &mut FormErrors, email: &str) {
    if email.chars().all(|c| c.is_ascii_digit()) && !email.is_empty() {
        errors.push(Field::Email, "Email must not contain numbers only");
    } else if !email_regex().is_match(email) {
        errors.push(
            Field::Email,
            "Invalid email. Email must be a valid email address",
        );
    }
}

fn username_regex() -> &'static Regex {
    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_ ]+$").expect("Failed to compile username regex"))
}

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    })
}
