use serde::{Deserialize, Serialize};

/// Creator id stamped on tasks generated from executed proposals.
pub const SYSTEM_GENERATED_USER_ID: &str = "SYSTEM_AUTO_GEN";

/// A board member. Tasks hold users by value in their assignee list; the same
/// user may be assigned to many tasks.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: None,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// The user the local session acts as when no other identity is configured.
    pub fn mock_current() -> Self {
        User::new("user-mock-current-001", "Current Mock User")
            .with_avatar("/placeholder-avatar-current.jpg")
    }

    /// Other members referenced by the seeded board.
    pub fn mock_others() -> Vec<User> {
        vec![
            User::new("user-alice-002", "Alice Wonderland").with_avatar("/placeholder-avatar-alice.jpg"),
            User::new("user-bob-003", "Bob The Builder").with_avatar("/placeholder-avatar-bob.jpg"),
            User::new("user-charlie-004", "Charlie Brown").with_avatar("/placeholder-avatar-charlie.jpg"),
        ]
    }
}
