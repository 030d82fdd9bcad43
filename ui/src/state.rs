use yewdux::prelude::*;

/// Session knowledge for this page load, as last reported by the
/// identity client.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unknown,
    SignedOut,
    SignedIn {
        email: String,
    },
}

#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    pub session: SessionState,
}

impl State {
    pub fn session_email(&self) -> Option<&str> {
        match &self.session {
            SessionState::SignedIn { email } => Some(email),
            _ => None,
        }
    }

    pub fn sign_out(&mut self) {
        self.session = SessionState::SignedOut;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The header's email span and logout button both key off this.
    #[test]
    fn session_email_only_while_signed_in() {
        let mut state = State::default();
        assert_eq!(state.session_email(), None);

        state.session = SessionState::SignedIn {
            email: "jane@acme.test".to_string(),
        };
        assert_eq!(state.session_email(), Some("jane@acme.test"));

        state.sign_out();
        assert_eq!(state.session_email(), None);
    }
}
