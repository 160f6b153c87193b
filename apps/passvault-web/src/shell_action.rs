use passvault_client_core::models::EntryId;
use passvault_client_core::render::{
    ACTION_COPY_PASSWORD, ACTION_DELETE_PASSWORD, ACTION_DELETE_USER,
};

/// Click on a rendered list row control, resolved from its `data-action` and
/// `data-id` attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShellAction {
    CopyPassword(EntryId),
    DeletePassword(EntryId),
    DeleteUser(EntryId),
}

impl ShellAction {
    pub(crate) fn parse(action: &str, id: &str) -> Option<Self> {
        let id = id.trim().parse::<EntryId>().ok()?;
        match action {
            ACTION_COPY_PASSWORD => Some(Self::CopyPassword(id)),
            ACTION_DELETE_PASSWORD => Some(Self::DeletePassword(id)),
            ACTION_DELETE_USER => Some(Self::DeleteUser(id)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ShellAction;

    #[test]
    fn parses_known_actions() {
        assert_eq!(
            ShellAction::parse("copy-password", "4"),
            Some(ShellAction::CopyPassword(4))
        );
        assert_eq!(
            ShellAction::parse("delete-password", " 12 "),
            Some(ShellAction::DeletePassword(12))
        );
        assert_eq!(
            ShellAction::parse("delete-user", "3"),
            Some(ShellAction::DeleteUser(3))
        );
    }

    #[test]
    fn rejects_unknown_action_or_bad_id() {
        assert_eq!(ShellAction::parse("rename", "1"), None);
        assert_eq!(ShellAction::parse("delete-user", "abc"), None);
        assert_eq!(ShellAction::parse("delete-user", ""), None);
    }
}
