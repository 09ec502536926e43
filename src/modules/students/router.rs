use crate::modules::students::controller::{
    create_student, delete_student, get_student, get_students, update_student,
    update_student_status,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch},
};

/// Student records for academics. Create, update and delete also require the
/// administrative sub-role through their extractor; the status toggle stays open
/// to every academic.
pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_students).post(create_student))
        .route(
            "/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route("/{id}/status", patch(update_student_status))
}
