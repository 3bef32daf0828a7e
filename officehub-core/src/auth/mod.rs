use std::collections::BTreeSet;
use std::future::Future;

use crate::errors::{EntityError, EntityResult};

pub mod roles {
    pub const SUPER_ADMIN: &str = "Super Admin";
    pub const ADMIN: &str = "Admin";
    pub const DEFAULT_USER: &str = "Default User";

    /// Roles allowed to manage offices, rooms and users
    pub const ADMINS: [&str; 2] = [ADMIN, SUPER_ADMIN];
}

/// The caller of an operation, as resolved from the request context
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Actor {
    pub user_id: Option<i32>,
    pub email: Option<String>,
    pub location: Option<String>,
    roles: BTreeSet<String>,
}

impl Actor {
    pub fn user(user_id: i32, email: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id),
            email: Some(email.into()),
            location: None,
            roles: BTreeSet::new(),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            email: None,
            location: None,
            roles: BTreeSet::new(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(String::as_str)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// Email of an authenticated caller
    pub fn require_email(&self) -> EntityResult<&str> {
        self.email
            .as_deref()
            .ok_or_else(|| EntityError::permission("You are not authenticated"))
    }
}

/// Gate placed in front of a mutation: the caller must hold at least one of
/// the required roles.
#[derive(Clone, Debug)]
pub struct RoleGuard {
    required: BTreeSet<String>,
}

impl RoleGuard {
    pub fn any_of<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn admins() -> Self {
        Self::any_of(roles::ADMINS)
    }

    pub fn super_admin() -> Self {
        Self::any_of([roles::SUPER_ADMIN])
    }

    pub fn check(&self, actor: &Actor) -> EntityResult<()> {
        if actor.roles().any(|role| self.required.contains(role)) {
            return Ok(());
        }

        tracing::debug!(
            user_id = ?actor.user_id,
            required = ?self.required,
            "role guard rejected caller"
        );
        Err(EntityError::permission(
            "You are not authorized to perform this action",
        ))
    }

    /// Run `operation` only when the caller passes the guard.
    pub async fn run<F, Fut, T>(&self, actor: &Actor, operation: F) -> EntityResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = EntityResult<T>>,
    {
        self.check(actor)?;
        operation().await
    }
}

/// Admins may only change resources in their own location; super admins are
/// not scoped.
pub fn verify_location_scope(actor: &Actor, location_name: &str) -> EntityResult<()> {
    if actor.has_role(roles::SUPER_ADMIN) {
        return Ok(());
    }

    match actor.location.as_deref() {
        Some(own) if own.eq_ignore_ascii_case(location_name) => Ok(()),
        _ => Err(EntityError::permission(format!(
            "You are not authorized to make changes in {}",
            location_name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_is_rejected_by_admin_guard() {
        let actor = Actor::user(1, "member@example.com").with_role("Member");
        let result = RoleGuard::admins().check(&actor);
        assert!(matches!(result, Err(EntityError::Permission(_))));
    }

    #[test]
    fn test_admin_is_admitted() {
        let actor = Actor::user(2, "admin@example.com").with_role(roles::ADMIN);
        assert!(RoleGuard::admins().check(&actor).is_ok());
    }

    #[test]
    fn test_anonymous_is_rejected() {
        assert!(RoleGuard::admins().check(&Actor::anonymous()).is_err());
    }

    #[tokio::test]
    async fn test_rejected_operation_is_not_executed() {
        let actor = Actor::user(1, "member@example.com").with_role("Member");
        let ran = std::cell::Cell::new(false);
        let ran_ref = &ran;
        let result = RoleGuard::super_admin()
            .run(&actor, || async move {
                ran_ref.set(true);
                Ok(())
            })
            .await;

        assert!(result.is_err());
        assert!(!ran.get());
    }

    #[test]
    fn test_location_scope() {
        let admin = Actor::user(3, "admin@example.com")
            .with_role(roles::ADMIN)
            .with_location(Some("Lagos".to_string()));
        assert!(verify_location_scope(&admin, "Lagos").is_ok());

        let err = verify_location_scope(&admin, "Kampala").unwrap_err();
        assert_eq!(
            err.to_string(),
            "You are not authorized to make changes in Kampala"
        );

        let super_admin = Actor::user(4, "root@example.com").with_role(roles::SUPER_ADMIN);
        assert!(verify_location_scope(&super_admin, "Kampala").is_ok());
    }
}
