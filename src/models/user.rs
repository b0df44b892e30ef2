use serde::{Deserialize, Serialize};

/// A registered user of the ratings site
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub user_id: u64,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub zipcode: Option<String>,
    pub gender: Option<String>,
    pub occupation: Option<String>,
}

/// Profile fields supplied when registering a user
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewUser {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub zipcode: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
}

impl User {
    /// Creates a user with the given id from registration fields
    pub fn new(user_id: u64, new_user: NewUser) -> Self {
        Self {
            user_id,
            email: new_user.email,
            age: new_user.age,
            zipcode: new_user.zipcode,
            gender: new_user.gender,
            occupation: new_user.occupation,
        }
    }

    /// Whether this user registered with `email` (case-insensitive)
    pub fn has_email(&self, email: &str) -> bool {
        self.email
            .as_deref()
            .is_some_and(|own| own.eq_ignore_ascii_case(email))
    }
}
