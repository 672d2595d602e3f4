//! Authorization roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Known role names.
///
/// Serialized with the `ROLE_` prefix, which is also how they are stored in
/// the `roles` table and carried in the JWT `roles` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoleName {
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_MODERATOR")]
    Moderator,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl RoleName {
    pub const ALL: [RoleName; 3] = [RoleName::User, RoleName::Moderator, RoleName::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::User => "ROLE_USER",
            RoleName::Moderator => "ROLE_MODERATOR",
            RoleName::Admin => "ROLE_ADMIN",
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for RoleName {
    type Err = UnknownRole;

    /// Parses `ROLE_ADMIN`, and also the short form `ADMIN` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let short = upper.strip_prefix("ROLE_").unwrap_or(&upper);

        match short {
            "USER" => Ok(RoleName::User),
            "MODERATOR" => Ok(RoleName::Moderator),
            "ADMIN" => Ok(RoleName::Admin),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// A role row.
#[derive(Debug, Clone)]
pub struct Role {
    pub id: i64,
    pub name: RoleName,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_and_short_names() {
        assert_eq!("ROLE_ADMIN".parse::<RoleName>().unwrap(), RoleName::Admin);
        assert_eq!("admin".parse::<RoleName>().unwrap(), RoleName::Admin);
        assert_eq!(
            "role_moderator".parse::<RoleName>().unwrap(),
            RoleName::Moderator
        );
        assert_eq!(" USER ".parse::<RoleName>().unwrap(), RoleName::User);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "ROLE_ROOT".parse::<RoleName>().unwrap_err();
        assert_eq!(err, UnknownRole("ROLE_ROOT".to_string()));
    }

    #[test]
    fn test_serde_uses_prefixed_names() {
        let json = serde_json::to_string(&RoleName::Moderator).unwrap();
        assert_eq!(json, "\"ROLE_MODERATOR\"");

        let back: RoleName = serde_json::from_str("\"ROLE_USER\"").unwrap();
        assert_eq!(back, RoleName::User);
    }

    #[test]
    fn test_display_matches_as_str() {
        for role in RoleName::ALL {
            assert_eq!(role.to_string(), role.as_str());
        }
    }
}
