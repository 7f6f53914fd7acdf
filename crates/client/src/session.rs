//! Signed-in state of the client.
//!
//! The mirror is a snapshot: it does not follow server-side changes. Callers
//! re-initialize it through [`ClientSession::refresh`] after a profile update
//! or a re-login.

use retailgate_catalog::CATALOG_VERSION;

use crate::error::ClientError;
use crate::mirror::PermissionMirror;
use crate::types::CurrentUser;

#[derive(Debug, Default)]
pub struct ClientSession {
    state: Option<SignedIn>,
}

#[derive(Debug)]
struct SignedIn {
    user: CurrentUser,
    mirror: PermissionMirror,
}

impl ClientSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&mut self, user: CurrentUser) {
        tracing::debug!(user_id = %user.id, role = %user.role, "client session signed in");
        self.load(user);
    }

    /// Replace the snapshot with a freshly fetched one.
    ///
    /// Returns `true` when the access fields changed.
    pub fn refresh(&mut self, user: CurrentUser) -> bool {
        let mirror = PermissionMirror::from_user(&user);
        let changed = self.state.as_ref().is_none_or(|state| state.mirror != mirror);
        if changed {
            tracing::debug!(user_id = %user.id, role = %user.role, "permission mirror re-initialized");
        }
        self.load(user);
        changed
    }

    pub fn sign_out(&mut self) {
        if let Some(state) = self.state.take() {
            tracing::debug!(user_id = %state.user.id, "client session signed out");
        }
    }

    fn load(&mut self, user: CurrentUser) {
        if user.catalog_version != CATALOG_VERSION {
            tracing::warn!(
                server = user.catalog_version,
                client = CATALOG_VERSION,
                "permission catalog version mismatch; UI gating may be stale"
            );
        }
        let mirror = PermissionMirror::from_user(&user);
        self.state = Some(SignedIn { user, mirror });
    }

    pub fn is_signed_in(&self) -> bool {
        self.state.is_some()
    }

    pub fn current_user(&self) -> Result<&CurrentUser, ClientError> {
        self.state
            .as_ref()
            .map(|state| &state.user)
            .ok_or(ClientError::NotSignedIn)
    }

    /// True when the server catalog differs from the one compiled in here.
    pub fn is_stale(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|state| state.user.catalog_version != CATALOG_VERSION)
    }

    /// Should the UI offer `permission`? Always false when signed out.
    pub fn can(&self, permission: &str) -> bool {
        self.state
            .as_ref()
            .is_some_and(|state| state.mirror.allows(permission))
    }

    pub fn can_any(&self, permissions: &[&str]) -> bool {
        self.state
            .as_ref()
            .is_some_and(|state| state.mirror.allows_any(permissions))
    }

    pub fn can_all(&self, permissions: &[&str]) -> bool {
        self.state
            .as_ref()
            .is_some_and(|state| state.mirror.allows_all(permissions))
    }
}

#[cfg(test)]
mod tests {
    use retailgate_catalog::{Role, permissions as p};

    use super::*;

    fn user(role: Role) -> CurrentUser {
        CurrentUser {
            id: "u-1".to_string(),
            email: "ana@shop.test".to_string(),
            display_name: "Ana".to_string(),
            role,
            active: true,
            permissions: None,
            catalog_version: CATALOG_VERSION,
        }
    }

    #[test]
    fn signed_out_session_allows_nothing() {
        let session = ClientSession::new();
        assert!(!session.can("products.view"));
        assert!(!session.can_all(&[]));
        assert!(matches!(session.current_user(), Err(ClientError::NotSignedIn)));
    }

    #[test]
    fn refresh_picks_up_override_changes() {
        let mut session = ClientSession::new();
        session.sign_in(user(Role::STAFF));
        assert!(session.can("sales.view"));

        let mut updated = user(Role::STAFF);
        updated.permissions = Some(vec![p::SALES_DELETE]);
        assert!(session.refresh(updated.clone()));
        assert!(!session.can("sales.view"));
        assert!(session.can("sales.delete"));

        assert!(!session.refresh(updated));
    }

    #[test]
    fn sign_out_clears_snapshot() {
        let mut session = ClientSession::new();
        session.sign_in(user(Role::ADMIN));
        assert!(session.can_all(&["usuarios.delete", "chat.manage"]));

        session.sign_out();
        assert!(!session.is_signed_in());
        assert!(!session.can("usuarios.delete"));
    }

    #[test]
    fn catalog_version_mismatch_marks_session_stale() {
        let mut session = ClientSession::new();
        let mut newer = user(Role::CUSTOMER);
        newer.catalog_version = CATALOG_VERSION + 1;
        session.sign_in(newer);
        assert!(session.is_stale());
        assert!(session.can("orders.view"));
    }
}
