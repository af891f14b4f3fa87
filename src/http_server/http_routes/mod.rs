pub mod artists;
pub mod home;
pub mod shows;
pub mod venues;

use axum::extract::{Path, rejection::PathRejection};

use crate::http_server::error::PageError;

/// Ids that don't parse as integers are treated like missing records.
pub(crate) fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, PageError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        log::debug!("Rejected path id: {}", rejection.body_text());
        PageError::NotFound
    })
}
