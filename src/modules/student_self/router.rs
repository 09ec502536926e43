use crate::modules::student_self::controller::{
    change_own_password, get_own_profile, update_own_contact,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, put},
};

pub fn init_student_self_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_own_profile).put(update_own_contact))
        .route("/me/password", put(change_own_password))
}
