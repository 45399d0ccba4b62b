pub mod auth;
pub mod chat;
pub mod home;
pub mod notice;
pub mod shell;
pub mod sidebar;

/// Up to two initials for an avatar badge.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}
