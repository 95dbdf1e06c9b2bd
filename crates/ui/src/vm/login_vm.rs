use services::AuthError;
use study_core::model::Credentials;

/// Inline message shown under the login form.
#[must_use]
pub fn login_failure_message(err: &AuthError) -> String {
    format!("Login failed: {}", err.message())
}

/// Credentials from the form fields; the username is trimmed, the password is not.
#[must_use]
pub fn form_credentials(username: &str, password: &str) -> Credentials {
    Credentials::new(username.trim(), password)
}
