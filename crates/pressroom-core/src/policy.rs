//! Publish gate and role permissions
//!
//! Deciding *who* may publish belongs to the caller. The orchestrator still
//! asks a [`PublishGate`] before any store access, and the default gate
//! denies, so a caller that never wired its authorization check in cannot
//! publish by accident.

use crate::errors::{ExError, ExErrorKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Gate consulted once per publish, before any store I/O.
pub trait PublishGate: Send + Sync {
    /// Check whether publishing `slug` is allowed.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::PublishDenied` if the publish must not proceed.
    fn check(&self, slug: &str) -> std::result::Result<(), ExError>;
}

/// Always denies. The fail-closed default.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAllGate;

impl PublishGate for DenyAllGate {
    fn check(&self, slug: &str) -> std::result::Result<(), ExError> {
        Err(ExError::new(ExErrorKind::PublishDenied)
            .with_op("publish_gate")
            .with_slug(slug)
            .with_message("no upstream authorization was supplied"))
    }
}

/// Always allows. For callers that authorize out of band, and for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAllGate;

impl PublishGate for AllowAllGate {
    fn check(&self, _slug: &str) -> std::result::Result<(), ExError> {
        Ok(())
    }
}

/// Editorial role of the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Viewer,
    Editor,
    Publisher,
}

/// What a role may do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    pub can_preview: bool,
    pub can_edit: bool,
    pub can_publish: bool,
}

impl Role {
    pub fn permissions(&self) -> Permissions {
        match self {
            Role::Viewer => Permissions {
                can_preview: true,
                can_edit: false,
                can_publish: false,
            },
            Role::Editor => Permissions {
                can_preview: true,
                can_edit: true,
                can_publish: false,
            },
            Role::Publisher => Permissions {
                can_preview: true,
                can_edit: true,
                can_publish: true,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Editor => "editor",
            Role::Publisher => "publisher",
        }
    }
}

impl FromStr for Role {
    type Err = ExError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "viewer" => Ok(Role::Viewer),
            "editor" => Ok(Role::Editor),
            "publisher" => Ok(Role::Publisher),
            other => Err(ExError::new(ExErrorKind::Config)
                .with_op("parse_role")
                .with_message(format!(
                    "unknown role '{}' (expected viewer, editor or publisher)",
                    other
                ))),
        }
    }
}

/// Gate admitting callers whose already-authenticated role can publish
#[derive(Debug, Clone, Copy)]
pub struct RoleGate {
    role: Role,
}

impl RoleGate {
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

impl PublishGate for RoleGate {
    fn check(&self, slug: &str) -> std::result::Result<(), ExError> {
        if self.role.permissions().can_publish {
            Ok(())
        } else {
            Err(ExError::new(ExErrorKind::PublishDenied)
                .with_op("publish_gate")
                .with_slug(slug)
                .with_message(format!("role '{}' may not publish", self.role.as_str())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deny_all_gate_denies() {
        let err = DenyAllGate.check("home").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::PublishDenied);
        assert_eq!(err.slug(), Some("home"));
    }

    #[test]
    fn test_allow_all_gate_allows() {
        assert!(AllowAllGate.check("home").is_ok());
    }

    #[test]
    fn test_only_publisher_role_passes_gate() {
        assert!(RoleGate::new(Role::Publisher).check("home").is_ok());

        for role in [Role::Viewer, Role::Editor] {
            let err = RoleGate::new(role).check("home").unwrap_err();
            assert_eq!(err.kind(), ExErrorKind::PublishDenied);
        }
    }

    #[test]
    fn test_every_role_can_preview() {
        for role in [Role::Viewer, Role::Editor, Role::Publisher] {
            assert!(role.permissions().can_preview);
        }
        assert!(!Role::Viewer.permissions().can_edit);
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("publisher".parse::<Role>().unwrap(), Role::Publisher);
        assert_eq!(
            "admin".parse::<Role>().unwrap_err().kind(),
            ExErrorKind::Config
        );
    }
}
