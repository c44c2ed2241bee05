//! Landing page form state.

use api::{Credentials, DemoSettings};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

/// What the landing form asks the session controller to do.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthSubmission {
    Login(Credentials),
    Signup {
        name: String,
        email: String,
        password: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl AuthForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch between sign-in and sign-up. Field contents are kept.
    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        };
    }

    pub fn is_login(&self) -> bool {
        self.mode == AuthMode::Login
    }

    pub fn subtitle(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Sign in to your account",
            AuthMode::Signup => "Create a new account",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Sign in",
            AuthMode::Signup => "Sign up",
        }
    }

    /// The prompt and link text for switching modes.
    pub fn toggle_prompt(&self) -> (&'static str, &'static str) {
        match self.mode {
            AuthMode::Login => ("Don't have an account?", "Sign up"),
            AuthMode::Signup => ("Already have an account?", "Sign in"),
        }
    }

    pub fn submission(&self) -> AuthSubmission {
        match self.mode {
            AuthMode::Login => {
                AuthSubmission::Login(Credentials::new(self.email.clone(), self.password.clone()))
            }
            AuthMode::Signup => AuthSubmission::Signup {
                name: self.name.clone(),
                email: self.email.clone(),
                password: self.password.clone(),
            },
        }
    }
}

/// Login request for the "Try Demo" button.
pub fn demo_submission(demo: &DemoSettings) -> AuthSubmission {
    AuthSubmission::Login(Credentials::new(demo.email.clone(), demo.password.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_switches_mode_and_keeps_fields() {
        let mut form = AuthForm::new();
        form.email = "ana@example.com".into();
        assert!(form.is_login());
        assert_eq!(form.submit_label(), "Sign in");

        form.toggle();
        assert_eq!(form.mode, AuthMode::Signup);
        assert_eq!(form.subtitle(), "Create a new account");
        assert_eq!(form.toggle_prompt(), ("Already have an account?", "Sign in"));
        assert_eq!(form.email, "ana@example.com");

        form.toggle();
        assert!(form.is_login());
    }

    #[test]
    fn submission_follows_mode() {
        let mut form = AuthForm {
            mode: AuthMode::Login,
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "pw".into(),
        };
        assert_eq!(
            form.submission(),
            AuthSubmission::Login(Credentials::new("ana@example.com", "pw"))
        );

        form.toggle();
        assert_eq!(
            form.submission(),
            AuthSubmission::Signup {
                name: "Ana".into(),
                email: "ana@example.com".into(),
                password: "pw".into(),
            }
        );
    }

    #[test]
    fn demo_uses_fixture_account() {
        assert_eq!(
            demo_submission(&DemoSettings::default()),
            AuthSubmission::Login(Credentials::new("demo@example.com", "password123"))
        );
    }
}
