/// What the expiry timer does once a message's display time has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExpiryStep {
    /// Controller is free: expire the message and re-render.
    Expire,
    /// A request holds the controller but the banner still shows this
    /// message: blank the banner now, expire the state once the lock frees.
    BlankBannerThenExpire,
    /// A request holds the controller and the banner shows something else.
    ExpireWhenFree,
}

pub(crate) fn expiry_step(
    controller_free: bool,
    displayed_message: Option<u64>,
    expiring_message: u64,
) -> ExpiryStep {
    if controller_free {
        ExpiryStep::Expire
    } else if displayed_message == Some(expiring_message) {
        ExpiryStep::BlankBannerThenExpire
    } else {
        ExpiryStep::ExpireWhenFree
    }
}

#[cfg(test)]
mod tests {
    use super::{ExpiryStep, expiry_step};

    #[test]
    fn free_controller_expires_directly() {
        assert_eq!(expiry_step(true, Some(4), 4), ExpiryStep::Expire);
        assert_eq!(expiry_step(true, None, 4), ExpiryStep::Expire);
    }

    #[test]
    fn busy_controller_still_blanks_the_expiring_banner() {
        assert_eq!(
            expiry_step(false, Some(4), 4),
            ExpiryStep::BlankBannerThenExpire
        );
    }

    #[test]
    fn busy_controller_leaves_a_newer_banner_alone() {
        assert_eq!(expiry_step(false, Some(5), 4), ExpiryStep::ExpireWhenFree);
        assert_eq!(expiry_step(false, None, 4), ExpiryStep::ExpireWhenFree);
    }
}
