use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::api::ActionKind;

/// Tracks which user actions have a request pending.
#[derive(Debug, Clone, Default)]
pub struct InFlightActions {
    active: Rc<RefCell<BTreeSet<ActionKind>>>,
}

impl InFlightActions {
    /// Marks `action` as pending. Returns `None` while the same action is
    /// already pending; the returned guard releases it on drop.
    #[must_use]
    pub fn try_begin(&self, action: ActionKind) -> Option<InFlightGuard> {
        if !self.active.borrow_mut().insert(action) {
            return None;
        }
        Some(InFlightGuard {
            active: Rc::clone(&self.active),
            action,
        })
    }

    #[must_use]
    pub fn is_pending(&self, action: ActionKind) -> bool {
        self.active.borrow().contains(&action)
    }
}

#[derive(Debug)]
pub struct InFlightGuard {
    active: Rc<RefCell<BTreeSet<ActionKind>>>,
    action: ActionKind,
}

impl InFlightGuard {
    #[must_use]
    pub fn action(&self) -> ActionKind {
        self.action
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.active.borrow_mut().remove(&self.action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_action_is_rejected_until_guard_drops() {
        let in_flight = InFlightActions::default();
        let guard = in_flight.try_begin(ActionKind::DeletePassword);
        assert!(guard.is_some());
        assert!(in_flight.try_begin(ActionKind::DeletePassword).is_none());
        assert!(in_flight.is_pending(ActionKind::DeletePassword));

        drop(guard);
        assert!(!in_flight.is_pending(ActionKind::DeletePassword));
        assert!(in_flight.try_begin(ActionKind::DeletePassword).is_some());
    }

    #[test]
    fn different_actions_do_not_block_each_other() {
        let in_flight = InFlightActions::default();
        let _login = in_flight.try_begin(ActionKind::Login).expect("login");
        let copy = in_flight.try_begin(ActionKind::CopyPassword).expect("copy");
        assert_eq!(copy.action(), ActionKind::CopyPassword);
    }

    #[test]
    fn clones_share_state() {
        let in_flight = InFlightActions::default();
        let shared = in_flight.clone();
        let _guard = in_flight.try_begin(ActionKind::ListUsers).expect("list");
        assert!(shared.try_begin(ActionKind::ListUsers).is_none());
    }
}
