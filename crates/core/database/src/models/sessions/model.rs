use civic_result::Result;

use crate::{Database, Profile};

auto_derived!(
    /// User as reported by the auth service
    pub struct AuthUser {
        /// Unique Id
        pub id: String,
        /// Email address used to sign in
        #[serde(default)]
        pub email: Option<String>,
    }
);

/// Identity of whoever is using the client
///
/// Passed explicitly to every operation that needs an author.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<AuthUser>,
    pub profile: Option<Profile>,
}

impl Session {
    /// Session without a signed in user
    pub fn anonymous() -> Session {
        Session::default()
    }

    /// Session for a signed in user
    pub fn signed_in(user: AuthUser, profile: Option<Profile>) -> Session {
        Session {
            user: Some(user),
            profile,
        }
    }

    /// Resolve the current user and their profile
    pub async fn fetch(db: &Database) -> Result<Session> {
        let Some(user) = db.fetch_current_user().await? else {
            return Ok(Session::anonymous());
        };

        let profile = db
            .fetch_profiles(&[user.id.to_string()])
            .await?
            .into_iter()
            .next();

        Ok(Session::signed_in(user, profile))
    }

    /// Signed in user, required for any mutation
    pub fn user(&self) -> Result<&AuthUser> {
        self.user.as_ref().ok_or_else(|| create_error!(AuthRequired))
    }

    /// Whether a user is signed in
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Name to greet the user by, falling back to their email
    pub fn display_name(&self) -> Option<&str> {
        let user = self.user.as_ref()?;
        self.profile
            .as_ref()
            .and_then(|profile| profile.full_name.as_deref())
            .filter(|name| !name.is_empty())
            .or(user.email.as_deref())
    }
}
