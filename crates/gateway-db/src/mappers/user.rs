//! User entity <-> model mapper

use gateway_core::entities::User;

use crate::models::UserModel;

/// Convert UserModel to User entity
///
/// The password hash stays behind in the model; the entity never carries it.
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            email: model.email,
            forename: model.forename,
            surname: model.surname,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}
