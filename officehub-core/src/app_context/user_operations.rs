use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, Set};

use super::{AppContext, NewUser};
use crate::auth::{roles as role_names, Actor, RoleGuard};
use crate::database::entities::{roles, users, users_roles, EntityState};
use crate::errors::{EntityError, EntityResult};
use crate::services::{
    paginate, persist_changes, save_with, validate_email, validate_required, Page, PageRequest,
    SavePayload, UniquenessScope,
};

const USER: &str = "User";

impl AppContext {
    // ----- User helpers ----------------------------------------------------

    /// Register a user with the default role. The email is stored lowercased
    /// and stays reserved even after the user is archived.
    pub async fn create_user(&self, actor: &Actor, input: NewUser) -> EntityResult<users::Model> {
        RoleGuard::admins().check(actor)?;
        validate_required([("email", input.email.as_str()), ("name", input.name.as_str())])?;
        let email = validate_email(&input.email)?;

        let payload = SavePayload::<users::Entity>::new(users::Column::Email, email.clone())
            .scoped(UniquenessScope::Any);
        let user = users::ActiveModel {
            email: Set(email),
            name: Set(input.name),
            location: Set(input.location),
            picture: Set(input.picture),
            state: Set(EntityState::Active),
            ..Default::default()
        };

        save_with(&self.db, user, USER, payload, |txn, user| {
            Box::pin(async move { grant_role(txn, user.id, role_names::DEFAULT_USER).await })
        })
        .await?
        .into_result()
    }

    pub async fn list_users(
        &self,
        actor: &Actor,
        page: Option<i32>,
        per_page: Option<i32>,
    ) -> EntityResult<Page<users::Model>> {
        RoleGuard::admins().check(actor)?;
        let request = PageRequest::from_args(page, per_page, &self.config.pagination)?;
        let select = users::Entity::find().filter(users::Column::State.eq(EntityState::Active));
        paginate(&self.db, select, request, "users").await
    }

    pub async fn get_user_by_email(
        &self,
        actor: &Actor,
        email: &str,
    ) -> EntityResult<users::Model> {
        if !actor.is_authenticated() {
            return Err(EntityError::permission("You are not authenticated"));
        }

        users::Entity::find()
            .filter(users::Column::Email.eq(email.trim().to_lowercase()))
            .filter(users::Column::State.eq(EntityState::Active))
            .one(&self.db)
            .await?
            .ok_or_else(|| EntityError::not_found("User not found"))
    }

    pub async fn delete_user(&self, actor: &Actor, user_id: i32) -> EntityResult<users::Model> {
        RoleGuard::super_admin().check(actor)?;

        let user = self.user(user_id).await?;
        let email = user.email.clone();
        let mut user: users::ActiveModel = user.into();
        user.state = Set(EntityState::Archived);
        let archived = persist_changes(&self.db, user, USER, &email).await?;

        tracing::info!(user_id, "user archived");
        Ok(archived)
    }

    /// Give a user a role. Assigning a role the user already holds is a no-op.
    pub async fn assign_role(
        &self,
        actor: &Actor,
        email: &str,
        role: &str,
    ) -> EntityResult<users::Model> {
        RoleGuard::super_admin().check(actor)?;

        let user = self.get_user_by_email(actor, email).await?;
        grant_role(&self.db, user.id, role).await?;

        tracing::info!(user_id = user.id, role, "role assigned");
        Ok(user)
    }

    pub async fn roles_for_user(&self, user_id: i32) -> EntityResult<Vec<String>> {
        let user = self.user(user_id).await?;
        let assigned = user.find_related(roles::Entity).all(&self.db).await?;
        Ok(assigned.into_iter().map(|role| role.role).collect())
    }

    /// Active user by id
    pub async fn user(&self, user_id: i32) -> EntityResult<users::Model> {
        users::Entity::find_by_id(user_id)
            .filter(users::Column::State.eq(EntityState::Active))
            .one(&self.db)
            .await?
            .ok_or_else(|| EntityError::not_found("User not found"))
    }
}

async fn grant_role<C: ConnectionTrait>(db: &C, user_id: i32, role: &str) -> EntityResult<()> {
    let role = roles::Entity::find()
        .filter(roles::Column::Role.eq(role))
        .one(db)
        .await?
        .ok_or_else(|| EntityError::not_found(format!("Role {} not found", role)))?;

    let held = users_roles::Entity::find_by_id((user_id, role.id)).one(db).await?;
    if held.is_some() {
        return Ok(());
    }

    let link = users_roles::ActiveModel {
        user_id: Set(user_id),
        role_id: Set(role.id),
    };
    users_roles::Entity::insert(link)
        .exec_without_returning(db)
        .await?;
    Ok(())
}
