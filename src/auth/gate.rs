//! Pure gate decision for protected screens.
//!
//! The UI wrapper and the server middleware both resolve the same question:
//! given what we currently know about the session, may protected content be
//! shown? Keeping the decision a pure function means the no-flash-of-content
//! rule is testable without a browser or a live session.

/// What the auth check has established so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateCheck {
    /// Check still in flight
    Checking,
    /// No valid session
    Unauthenticated,
    /// Valid session; admin role resolved from the backend
    Authenticated { is_admin: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Neutral loading indicator; protected content must not render yet
    ShowLoading,
    RedirectLogin,
    RedirectUnauthorized,
    Render,
}

pub fn resolve(check: GateCheck, admin_only: bool) -> GateOutcome {
    match check {
        GateCheck::Checking => GateOutcome::ShowLoading,
        GateCheck::Unauthenticated => GateOutcome::RedirectLogin,
        GateCheck::Authenticated { is_admin } => {
            if admin_only && !is_admin {
                GateOutcome::RedirectUnauthorized
            } else {
                GateOutcome::Render
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_check_never_renders() {
        assert_eq!(resolve(GateCheck::Checking, false), GateOutcome::ShowLoading);
        assert_eq!(resolve(GateCheck::Checking, true), GateOutcome::ShowLoading);
    }

    #[test]
    fn missing_session_redirects_to_login() {
        assert_eq!(resolve(GateCheck::Unauthenticated, false), GateOutcome::RedirectLogin);
        assert_eq!(resolve(GateCheck::Unauthenticated, true), GateOutcome::RedirectLogin);
    }

    #[test]
    fn non_admin_on_admin_screen_redirects_to_unauthorized() {
        assert_eq!(
            resolve(GateCheck::Authenticated { is_admin: false }, true),
            GateOutcome::RedirectUnauthorized
        );
    }

    #[test]
    fn authenticated_users_render() {
        assert_eq!(
            resolve(GateCheck::Authenticated { is_admin: false }, false),
            GateOutcome::Render
        );
        assert_eq!(
            resolve(GateCheck::Authenticated { is_admin: true }, true),
            GateOutcome::Render
        );
    }
}
