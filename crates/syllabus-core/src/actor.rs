//! Caller identity handed over by the auth collaborator, and the
//! process-wide role grants consulted before authoring operations.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::AccessDenied;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Instructor,
    Student,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Instructor => "instructor",
            Role::Student => "student",
            Role::Admin => "admin",
        })
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "instructor" => Ok(Role::Instructor),
            "student" | "learner" => Ok(Role::Student),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewCourse,
    ManageCourse,
    ManageModule,
    ManageContent,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Permission::ViewCourse => "view courses",
            Permission::ManageCourse => "manage courses",
            Permission::ManageModule => "manage modules",
            Permission::ManageContent => "manage content",
        })
    }
}

/// Permissions granted to each role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGrants {
    grants: HashMap<Role, HashSet<Permission>>,
}

impl RoleGrants {
    /// Students read; instructors and admins author.
    pub fn standard() -> Self {
        use Permission::*;

        let authoring: HashSet<_> = [ViewCourse, ManageCourse, ManageModule, ManageContent]
            .into_iter()
            .collect();
        let grants = HashMap::from([
            (Role::Student, HashSet::from([ViewCourse])),
            (Role::Instructor, authoring.clone()),
            (Role::Admin, authoring),
        ]);
        Self { grants }
    }

    pub fn allows(&self, role: Role, permission: Permission) -> bool {
        self.grants
            .get(&role)
            .is_some_and(|granted| granted.contains(&permission))
    }
}

static ROLE_GRANTS: OnceCell<RoleGrants> = OnceCell::new();

/// Install the standard role grants. Safe to call more than once; later
/// calls return the grants installed by the first.
pub fn init_role_grants() -> &'static RoleGrants {
    ROLE_GRANTS.get_or_init(RoleGrants::standard)
}

/// Installed grants, or `None` before [`init_role_grants`] ran.
pub fn role_grants() -> Option<&'static RoleGrants> {
    ROLE_GRANTS.get()
}

/// A pre-authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    /// Denies everything until the grants are initialised.
    pub fn can(&self, permission: Permission) -> bool {
        role_grants().is_some_and(|grants| grants.allows(self.role, permission))
    }

    pub fn require(&self, permission: Permission) -> Result<(), AccessDenied> {
        if self.can(permission) {
            Ok(())
        } else {
            Err(AccessDenied {
                user_id: self.user_id.clone(),
                role: self.role,
                permission,
            })
        }
    }
}
