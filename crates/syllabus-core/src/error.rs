use thiserror::Error;

use crate::actor::{Permission, Role};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} title must not be empty")]
    EmptyTitle(&'static str),
    #[error("{0} owner must not be empty")]
    EmptyOwner(&'static str),
    #[error("invalid slug: '{0}' (lowercase letters, digits and single dashes)")]
    InvalidSlug(String),
    #[error("duplicate course slug: {0}")]
    DuplicateSlug(String),
    #[error("order must be non-negative, got {0}")]
    NegativeOrder(i32),
    #[error("no order left in {0}: the largest order is already taken")]
    OrderOverflow(String),
    #[error("missing order in {0}")]
    MissingOrder(String),
    #[error("duplicate order {order} in {scope}")]
    DuplicateOrder { scope: String, order: i32 },
    #[error("unknown content kind: '{0}'")]
    UnknownKind(String),
    #[error("malformed content binding: '{0}' (expected kind#id)")]
    MalformedBinding(String),
    #[error("blob locator must not be empty for {0}")]
    EmptyLocator(String),
    #[error("duplicate content key: {0}")]
    DuplicateContentKey(String),
    #[error("module '{module}' references unknown content key '{key}'")]
    UnknownContentKey { module: String, key: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("user '{user_id}' ({role}) is not allowed to {permission}")]
pub struct AccessDenied {
    pub user_id: String,
    pub role: Role,
    pub permission: Permission,
}
