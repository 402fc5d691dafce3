use std::fmt;

use serde::{Deserialize, Serialize};

use crate::course::{CourseId, ModuleId};

/// Sibling set within which an order value is unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderScope {
    /// All modules of one course.
    ModulesOf(CourseId),
    /// All items of one module.
    ItemsOf(ModuleId),
}

impl OrderScope {
    /// Id of the row that owns the scope.
    pub fn parent_id(self) -> i32 {
        match self {
            OrderScope::ModulesOf(id) | OrderScope::ItemsOf(id) => id,
        }
    }
}

impl fmt::Display for OrderScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderScope::ModulesOf(id) => write!(f, "modules of course {id}"),
            OrderScope::ItemsOf(id) => write!(f, "items of module {id}"),
        }
    }
}

/// Order for the next member of a scope given the current maximum.
///
/// An empty scope starts at 0. Gaps in the middle of a scope persist, but
/// deleting the current maximum frees that value for the next append.
/// Returns `None` once the maximum is `i32::MAX` and no order is left.
pub fn next_order(current_max: Option<i32>) -> Option<i32> {
    match current_max {
        None => Some(0),
        Some(max) => max.checked_add(1),
    }
}
