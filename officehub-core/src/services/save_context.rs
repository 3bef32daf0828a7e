//! Scoped saves with uniqueness checks and error translation
//!
//! [`save_with`] is the write path for new entities:
//!
//! 1. look for a non-deleted entity that already holds the uniqueness value
//!    and fail with a duplicate error before touching the store;
//! 2. open a transaction and insert the entity;
//! 3. run the caller's body (dependent rows, notifications);
//! 4. commit, or roll back when anything but an auxiliary failure occurred.
//!
//! The pre-check is only a fast path. Partial unique indexes in the schema
//! make the store reject the second of two racing inserts, and that rejection
//! is reported as the same duplicate error.

use std::future::Future;
use std::pin::Pin;

use sea_orm::sea_query::SimpleExpr;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DatabaseTransaction, EntityTrait, IntoActiveModel, QueryFilter,
    TransactionTrait,
};

use crate::database::entities::{EntityState, LifecycleEntity};
use crate::errors::{EntityError, EntityResult};

pub type ModelOf<A> = <<A as ActiveModelTrait>::Entity as EntityTrait>::Model;

/// Future returned by a save body. It may borrow the open transaction.
pub type SaveBody<'t> = Pin<Box<dyn Future<Output = EntityResult<()>> + Send + 't>>;

/// Which existing rows count when checking uniqueness
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UniquenessScope {
    /// Only active rows
    Active,
    /// Active and archived rows; only deleted rows free the value
    #[default]
    NotDeleted,
    /// Every row, for columns with a plain unique key
    Any,
}

/// The uniqueness rule a save must satisfy: `column` must not already hold
/// `value` among rows of the entity's table in `scope`.
pub struct SavePayload<E: EntityTrait> {
    column: E::Column,
    value: String,
    scope: UniquenessScope,
    within: Vec<SimpleExpr>,
}

impl<E: LifecycleEntity> SavePayload<E> {
    pub fn new(column: E::Column, value: impl Into<String>) -> Self {
        Self {
            column,
            value: value.into(),
            scope: UniquenessScope::default(),
            within: Vec::new(),
        }
    }

    pub fn scoped(mut self, scope: UniquenessScope) -> Self {
        self.scope = scope;
        self
    }

    /// Narrow the check, e.g. to one location or to rows other than the one
    /// being renamed.
    pub fn within(mut self, expr: SimpleExpr) -> Self {
        self.within.push(expr);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    fn condition(&self) -> Condition {
        let state = E::state_column();
        let condition = self
            .within
            .iter()
            .cloned()
            .fold(Condition::all().add(self.column.eq(self.value.clone())), |cond, expr| {
                cond.add(expr)
            });

        match self.scope {
            UniquenessScope::Active => condition.add(state.eq(EntityState::Active)),
            UniquenessScope::NotDeleted => condition.add(state.ne(EntityState::Deleted)),
            UniquenessScope::Any => condition,
        }
    }
}

/// A committed entity, plus the auxiliary failure raised by the body if any
#[derive(Debug)]
pub struct SaveOutcome<M> {
    pub entity: M,
    pub warning: Option<EntityError>,
}

impl<M> SaveOutcome<M> {
    pub fn is_complete(&self) -> bool {
        self.warning.is_none()
    }

    /// Collapse to a plain result. The entity stays committed either way.
    pub fn into_result(self) -> EntityResult<M> {
        match self.warning {
            Some(warning) => Err(warning),
            None => Ok(self.entity),
        }
    }
}

/// Fail with a duplicate error when a row in scope already holds the value
pub async fn ensure_unique<C, E>(
    db: &C,
    entity_type: &str,
    payload: &SavePayload<E>,
) -> EntityResult<()>
where
    C: ConnectionTrait,
    E: LifecycleEntity,
{
    let existing = E::find().filter(payload.condition()).one(db).await?;

    if existing.is_some() {
        tracing::debug!(entity_type, value = %payload.value, "uniqueness check failed");
        return Err(EntityError::duplicate(entity_type, payload.value.clone()));
    }
    Ok(())
}

/// Insert `entity` after a uniqueness check, running `body` before commit.
/// The body receives the open transaction and the inserted model, so
/// dependent rows it writes share the entity's fate.
///
/// An auxiliary error from `body` keeps the entity committed and is returned
/// in [`SaveOutcome::warning`]. Any other error from `body`, or a failed
/// insert, rolls the transaction back.
pub async fn save_with<A, F>(
    db: &DatabaseConnection,
    entity: A,
    entity_type: &str,
    payload: SavePayload<A::Entity>,
    body: F,
) -> EntityResult<SaveOutcome<ModelOf<A>>>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send,
    A::Entity: LifecycleEntity,
    ModelOf<A>: IntoActiveModel<A> + Clone,
    F: for<'t> FnOnce(&'t DatabaseTransaction, ModelOf<A>) -> SaveBody<'t> + Send,
{
    ensure_unique(db, entity_type, &payload).await?;

    let txn = db
        .begin()
        .await
        .map_err(|e| EntityError::save(entity_type, e))?;

    let saved = match entity.insert(&txn).await {
        Ok(model) => model,
        Err(err) => {
            rollback(txn, entity_type).await;
            return Err(EntityError::from_write_err(entity_type, payload.value(), err));
        }
    };

    let warning = match body(&txn, saved.clone()).await {
        Ok(()) => None,
        Err(err) if err.is_auxiliary() => {
            tracing::warn!(entity_type, error = %err, "side effect failed after save");
            Some(err)
        }
        Err(err) => {
            rollback(txn, entity_type).await;
            return Err(err);
        }
    };

    txn.commit()
        .await
        .map_err(|e| EntityError::from_write_err(entity_type, payload.value(), e))?;

    tracing::info!(entity_type, value = %payload.value, "entity saved");
    Ok(SaveOutcome {
        entity: saved,
        warning,
    })
}

/// [`save_with`] without a body
pub async fn save_entity<A>(
    db: &DatabaseConnection,
    entity: A,
    entity_type: &str,
    payload: SavePayload<A::Entity>,
) -> EntityResult<ModelOf<A>>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send,
    A::Entity: LifecycleEntity,
    ModelOf<A>: IntoActiveModel<A> + Clone,
{
    save_with(db, entity, entity_type, payload, |_, _| Box::pin(async { Ok(()) }))
        .await?
        .into_result()
}

/// Write the changed fields of an existing entity. `value` is the entity's
/// uniqueness value after the change; a store-level unique violation is
/// reported as a duplicate of it.
pub async fn persist_changes<C, A>(
    db: &C,
    entity: A,
    entity_type: &str,
    value: &str,
) -> EntityResult<ModelOf<A>>
where
    C: ConnectionTrait,
    A: ActiveModelTrait + ActiveModelBehavior + Send,
    ModelOf<A>: IntoActiveModel<A>,
{
    if !entity.is_changed() {
        return Err(EntityError::validation(format!(
            "No {} fields to update",
            entity_type.to_lowercase()
        )));
    }

    entity
        .update(db)
        .await
        .map_err(|e| EntityError::from_write_err(entity_type, value, e))
}

async fn rollback(txn: DatabaseTransaction, entity_type: &str) {
    if let Err(e) = txn.rollback().await {
        tracing::error!(entity_type, error = %e, "rollback failed");
    }
}
