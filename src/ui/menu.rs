use crate::domain::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ListPosts,
    ToggleSignIn,
    ToggleRegistration,
    ToggleResetPassword,
    PostMessage,
    DeleteAccount,
    DeletePost,
    Quit,
}

impl MenuChoice {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(Self::ListPosts),
            "2" => Some(Self::ToggleSignIn),
            "3" => Some(Self::ToggleRegistration),
            "4" => Some(Self::ToggleResetPassword),
            "5" => Some(Self::PostMessage),
            "6" => Some(Self::DeleteAccount),
            "7" => Some(Self::DeletePost),
            "q" | "Q" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Builds the main menu. Entries 2 to 4 change wording with the session
/// state so the same number starts or finishes a flow.
pub fn render_menu(session: &Session, post_count: u64) -> String {
    let sign_in = if session.is_signed_in() {
        "Sign out"
    } else {
        "Sign in"
    };
    let registration = if session.is_registering() {
        "Finish registering as a new user"
    } else {
        "Register as a new user"
    };
    let reset = if session.is_resetting_password() {
        "Finish resetting password (you must be signed in)"
    } else {
        "Reset password (you must be signed in)"
    };

    let mut lines = vec![
        "Enter a value from 1 to 7 to perform an action or q/Q to quit:".to_owned(),
        format!("1: List last {post_count} posts"),
        format!("2: {sign_in}"),
        format!("3: {registration}"),
        format!("4: {reset}"),
        "5: Post a message (you must be signed in)".to_owned(),
        "6: Delete your account (you must be signed in)".to_owned(),
        "7: Delete a post (you must be signed in and it must be your post)".to_owned(),
        "q (or Q): Quit".to_owned(),
    ];

    if let Some(user) = session.signed_in_user() {
        lines.push(String::new());
        lines.push(format!("Signed in as {user}"));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_menu_numbers_and_quit() {
        assert_eq!(MenuChoice::parse(" 1 "), Some(MenuChoice::ListPosts));
        assert_eq!(MenuChoice::parse("7"), Some(MenuChoice::DeletePost));
        assert_eq!(MenuChoice::parse("q"), Some(MenuChoice::Quit));
        assert_eq!(MenuChoice::parse("Q\n"), Some(MenuChoice::Quit));
        assert_eq!(MenuChoice::parse("8"), None);
        assert_eq!(MenuChoice::parse("quit"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn anonymous_menu_offers_start_actions() {
        let menu = render_menu(&Session::default(), 25);

        assert!(menu.contains("1: List last 25 posts"));
        assert!(menu.contains("2: Sign in"));
        assert!(menu.contains("3: Register as a new user"));
        assert!(menu.contains("4: Reset password (you must be signed in)"));
        assert!(menu.ends_with("q (or Q): Quit"));
        assert!(!menu.contains("Signed in as"));
    }

    #[test]
    fn menu_reflects_pending_flows_and_identity() {
        let mut session = Session::default();
        session.begin_session("alice", "tok");
        session.begin_registration("carol");
        session.begin_password_reset("alice");

        let menu = render_menu(&session, 100);

        assert!(menu.contains("2: Sign out"));
        assert!(menu.contains("3: Finish registering as a new user"));
        assert!(menu.contains("4: Finish resetting password (you must be signed in)"));
        assert!(menu.ends_with("\n\nSigned in as alice"));
    }
}
