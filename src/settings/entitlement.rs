use std::sync::atomic::{AtomicBool, Ordering};

use super::Entitlement;

/// Pro status: granted by the pro build flavor or by an in-app purchase unlock.
#[derive(Debug, Default)]
pub struct ProEntitlement {
    pro_build: bool,
    unlocked_via_purchase: AtomicBool,
}

impl ProEntitlement {
    pub fn new(pro_build: bool, unlocked_via_purchase: bool) -> Self {
        Self {
            pro_build,
            unlocked_via_purchase: AtomicBool::new(unlocked_via_purchase),
        }
    }

    pub fn is_pro_build(&self) -> bool {
        self.pro_build
    }

    pub fn unlock(&self) {
        if !self.unlocked_via_purchase.swap(true, Ordering::AcqRel) {
            log::info!("pro features unlocked via purchase");
        }
    }

    /// Purchase refunded or revoked; the pro flavor stays pro regardless.
    pub fn revoke(&self) {
        if self.unlocked_via_purchase.swap(false, Ordering::AcqRel) {
            log::info!("purchase unlock revoked");
        }
    }
}

impl Entitlement for ProEntitlement {
    fn is_pro_unlocked(&self) -> bool {
        self.pro_build || self.unlocked_via_purchase.load(Ordering::Acquire)
    }
}
