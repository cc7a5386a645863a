use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::{constants::api::MAX_PAGE_SIZE, data::db::PageParams, error::Error};

// NOTE: we use i64 because the db uses i64
/// Pagination query parameters for the given endpoint
///
/// Parameters:
/// * `page`: 1-based index of the page to respond with (defaults to 1)
/// * `size`: the maximum amount of items in the page (defaults to [`DEFAULT_PAGE_SIZE`], at most
///   [`MAX_PAGE_SIZE`])
///
/// [`DEFAULT_PAGE_SIZE`]: crate::constants::api::DEFAULT_PAGE_SIZE
/// [`MAX_PAGE_SIZE`]: crate::constants::api::MAX_PAGE_SIZE
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    page: Option<i64>,
    size: Option<i64>,
}

/// Resolved pagination parameters for the given endpoint
///
/// The query parameters used for the requests are the ones described in [`PaginationQuery`]
#[derive(Debug)]
pub struct Pagination(pub PageParams);

impl TryFrom<PaginationQuery> for Pagination {
    type Error = Error;

    fn try_from(value: PaginationQuery) -> Result<Self, Self::Error> {
        if value.page.is_some_and(|page| page < 1) {
            return Err(Error::Validation("page must be greater than or equal to 1".into()));
        }
        if value.size.is_some_and(|size| !(1..=MAX_PAGE_SIZE).contains(&size)) {
            return Err(Error::Validation(format!("size must be between 1 and {MAX_PAGE_SIZE}")));
        }

        Ok(Self(PageParams::new(value.page, value.size)))
    }
}

impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PaginationQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| Error::Validation(rejection.body_text()))?;

        query.try_into()
    }
}
