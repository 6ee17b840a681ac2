//! # Auth Adapters
//!
//! Passcode-based implementation of `Authenticator`. Each configured
//! secret unlocks exactly one role; a role without a configured secret
//! is unreachable. There is no lockout or rate limiting; the shared
//! secrets are the whole authentication story.

use configs::Passcodes;
use domains::models::Role;
use domains::traits::Authenticator;
use secrecy::ExposeSecret;

pub struct PasscodeAuthenticator {
    passcodes: Passcodes,
}

impl PasscodeAuthenticator {
    pub fn new(passcodes: Passcodes) -> Self {
        Self { passcodes }
    }
}

impl Authenticator for PasscodeAuthenticator {
    fn authenticate(&self, submitted: &str) -> Option<Role> {
        let candidates = [
            (Role::Admin, self.passcodes.admin.as_ref()),
            (Role::User, self.passcodes.user.as_ref()),
            (Role::Guest, self.passcodes.guest.as_ref()),
            (Role::Chat, self.passcodes.chat.as_ref()),
            (Role::Moderator, self.passcodes.moderator.as_ref()),
        ];
        for (role, secret) in candidates {
            if let Some(secret) = secret {
                if secret.expose_secret() == submitted {
                    tracing::debug!(?role, "passcode accepted");
                    return Some(role);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn passcodes() -> Passcodes {
        Passcodes {
            admin: Some(SecretString::from("alpha".to_string())),
            user: Some(SecretString::from("bravo".to_string())),
            guest: None,
            chat: Some(SecretString::from("charlie".to_string())),
            moderator: Some(SecretString::from("delta".to_string())),
        }
    }

    #[test]
    fn each_passcode_unlocks_its_role() {
        let auth = PasscodeAuthenticator::new(passcodes());
        assert_eq!(auth.authenticate("alpha"), Some(Role::Admin));
        assert_eq!(auth.authenticate("bravo"), Some(Role::User));
        assert_eq!(auth.authenticate("charlie"), Some(Role::Chat));
        assert_eq!(auth.authenticate("delta"), Some(Role::Moderator));
    }

    #[test]
    fn unknown_passcode_matches_nothing() {
        let auth = PasscodeAuthenticator::new(passcodes());
        assert_eq!(auth.authenticate("echo"), None);
        assert_eq!(auth.authenticate(""), None);
    }

    #[test]
    fn unconfigured_role_is_unreachable() {
        // Guest has no secret above, so no input can produce Guest.
        let auth = PasscodeAuthenticator::new(passcodes());
        assert_eq!(auth.authenticate("guest"), None);
    }

    #[test]
    fn no_configuration_rejects_everything() {
        let auth = PasscodeAuthenticator::new(Passcodes::default());
        assert_eq!(auth.authenticate("alpha"), None);
    }
}
