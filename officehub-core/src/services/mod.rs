pub mod field_updater;
pub mod identity;
pub mod notification;
pub mod pagination;
pub mod save_context;
pub mod validation;

pub use field_updater::{to_field_map, update_entity_fields, FieldMap, UpdatableFields};
pub use identity::{IdentityProvider, SessionIdentityProvider};
pub use notification::{Notifier, OfficeCreatedNotice, TracingNotifier};
pub use pagination::{paginate, Page, PageRequest, PageWindow};
pub use save_context::{
    ensure_unique, persist_changes, save_entity, save_with, SaveBody, SaveOutcome, SavePayload,
    UniquenessScope,
};
pub use validation::{validate_email, validate_empty_fields, validate_required};
