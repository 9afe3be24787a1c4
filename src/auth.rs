//! Token cache keyed by role
//!
//! Both token slots live in app state and are handed to whoever needs them;
//! there is no global token storage. Tests construct a `TokenCache` directly
//! and fill it with fixed strings.

/// Authorization scope of an endpoint, naming the token slot it uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Admin, Role::User];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn other(&self) -> Role {
        match self {
            Role::Admin => Role::User,
            Role::User => Role::Admin,
        }
    }
}

/// Two-slot bearer token cache. No expiry; a slot holds whatever the last
/// login (or manual entry) put there.
#[derive(Debug, Clone, Default)]
pub struct TokenCache {
    admin: Option<String>,
    user: Option<String>,
}

impl TokenCache {
    pub fn get(&self, role: Role) -> Option<&str> {
        match role {
            Role::Admin => self.admin.as_deref(),
            Role::User => self.user.as_deref(),
        }
    }

    pub fn set(&mut self, role: Role, token: String) {
        match role {
            Role::Admin => self.admin = Some(token),
            Role::User => self.user = Some(token),
        }
    }

    pub fn clear(&mut self, role: Role) {
        match role {
            Role::Admin => self.admin = None,
            Role::User => self.user = None,
        }
    }

    pub fn has(&self, role: Role) -> bool {
        self.get(role).is_some()
    }
}

/// Mask a token for display: short tokens become dots, long ones keep the
/// first 7 and last 6 characters.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 15 {
        return "●".repeat(chars.len());
    }

    let first: String = chars[..7].iter().collect();
    let last: String = chars[chars.len() - 6..].iter().collect();
    format!("{}...{}", first, last)
}
