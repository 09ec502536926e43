use crate::modules::faculty::controller::{
    create_faculty, delete_faculty, get_faculty, get_faculty_member, update_faculty,
    update_faculty_status,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch},
};

pub fn init_faculty_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_faculty).post(create_faculty))
        .route(
            "/{id}",
            get(get_faculty_member)
                .put(update_faculty)
                .delete(delete_faculty),
        )
        .route("/{id}/status", patch(update_faculty_status))
}
