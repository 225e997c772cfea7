//! Current-user session model
//!
//! Authentication itself lives outside this layer; messaging and admission
//! only need to know who the current user is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of the signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Enrolled student
    Student,
    /// Teaching staff
    Teacher,
    /// Back-office administrator
    Admin,
}

impl Role {
    /// String representation used in storage and wire formats
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// User id
    pub user_id: String,

    /// Display name
    pub display_name: String,

    /// Role
    pub role: Role,
}

impl Session {
    /// Create a session
    ///
    /// # Arguments
    /// * `user_id` - User id
    /// * `display_name` - Display name
    /// * `role` - Role
    #[must_use]
    pub const fn new(user_id: String, display_name: String, role: Role) -> Self {
        Self {
            user_id,
            display_name,
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session() {
        let session = Session::new("u-1".to_string(), "Awa Ndiaye".to_string(), Role::Student);

        assert_eq!(session.user_id, "u-1");
        assert_eq!(session.role.as_str(), "student");
    }
}
