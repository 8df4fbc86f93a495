//! Unit tests for the login gate and its status type.

use roster_business::{AuthStatus, Credentials, INVALID_CREDENTIALS, LoginGate};

/// Tests for AuthStatus enum
mod auth_status_tests {
    use super::*;

    #[test]
    fn test_auth_status_default_is_logged_out() {
        let status = AuthStatus::default();
        assert!(!status.is_logged_in());
        assert!(status.username().is_none());
        assert!(status.error().is_none());
    }

    #[test]
    fn test_logged_in_returns_username() {
        let status = AuthStatus::LoggedIn {
            username: "test".to_string(),
        };
        assert!(status.is_logged_in());
        assert_eq!(status.username(), Some("test"));
    }

    #[test]
    fn test_rejected_returns_error() {
        let status = AuthStatus::Rejected(INVALID_CREDENTIALS.to_string());
        assert!(!status.is_logged_in());
        assert_eq!(status.error(), Some("Invalid username or password."));
    }
}

/// Tests for LoginGate
mod login_gate_tests {
    use super::*;

    #[test]
    fn test_default_gate_accepts_builtin_pair() {
        let mut gate = LoginGate::default();

        assert!(gate.attempt("test", "password"));
        assert!(gate.is_logged_in());
        assert_eq!(gate.status().username(), Some("test"));
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let mut gate = LoginGate::default();

        assert!(!gate.attempt("test", "hunter2"));
        assert!(!gate.is_logged_in());
        assert_eq!(gate.status().error(), Some(INVALID_CREDENTIALS));
    }

    #[test]
    fn test_comparison_is_exact() {
        let mut gate = LoginGate::default();

        assert!(!gate.attempt("Test", "password"));
        assert!(!gate.attempt("test ", "password"));
        assert!(!gate.attempt("", ""));
    }

    #[test]
    fn test_rejection_after_login_logs_out() {
        let mut gate = LoginGate::default();
        gate.attempt("test", "password");

        gate.attempt("test", "wrong");

        assert!(!gate.is_logged_in());
    }

    #[test]
    fn test_retry_after_rejection_clears_error() {
        let mut gate = LoginGate::default();
        gate.attempt("nobody", "nothing");

        assert!(gate.attempt("test", "password"));
        assert!(gate.status().error().is_none());
    }

    #[test]
    fn test_logout_returns_to_logged_out() {
        let mut gate = LoginGate::default();
        gate.attempt("test", "password");

        gate.logout();

        assert_eq!(gate.status(), &AuthStatus::LoggedOut);
    }

    #[test]
    fn test_custom_credentials() {
        let mut gate = LoginGate::new(Credentials {
            username: "admin".to_string(),
            password: "s3cret".to_string(),
        });

        assert!(!gate.attempt("test", "password"));
        assert!(gate.attempt("admin", "s3cret"));
    }
}
