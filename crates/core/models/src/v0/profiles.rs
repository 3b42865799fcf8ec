/// Name shown for authors without a profile or without a name
pub const ANONYMOUS: &str = "Anonymous";

auto_derived!(
    /// Public profile details joined onto reports and comments
    #[derive(Default)]
    pub struct AuthorProfile {
        /// Display name
        pub full_name: Option<String>,
    }
);

/// Resolve the name to display for an optionally joined profile
pub fn author_name(profile: Option<&AuthorProfile>) -> &str {
    profile
        .and_then(|profile| profile.full_name.as_deref())
        .filter(|name| !name.is_empty())
        .unwrap_or(ANONYMOUS)
}
