//! Octocrab client construction and shared request helpers.

use http::Uri;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;

use crate::github::error::IntakeError;
use crate::github::locator::PersonalAccessToken;

use super::MAX_PER_PAGE;
use super::error_mapping::map_octocrab_error;

/// Builds an Octocrab client for the given token and API base URL.
///
/// # Errors
///
/// Returns `IntakeError::InvalidUrl` when the base URI cannot be parsed or
/// `IntakeError::Api` when Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: &str,
) -> Result<Octocrab, IntakeError> {
    let base_uri: Uri = api_base
        .parse::<Uri>()
        .map_err(|error| IntakeError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .personal_token(token.as_ref())
        .base_uri(base_uri)
        .map_err(|error| IntakeError::Api {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}

/// Fetches one page of a JSON array endpoint.
pub(super) async fn get_page<T: DeserializeOwned>(
    client: &Octocrab,
    operation: &str,
    route: &str,
    page: u32,
    per_page: u8,
    extra: &[(&str, &str)],
) -> Result<Vec<T>, IntakeError> {
    let page_str = page.to_string();
    let per_page_str = per_page.to_string();
    let mut query_params: Vec<(&str, &str)> = extra.to_vec();
    query_params.push(("page", page_str.as_str()));
    query_params.push(("per_page", per_page_str.as_str()));

    tracing::debug!("{operation}: fetching {route} page {page} ({per_page} per page)");

    client
        .get::<Vec<T>, _, _>(route, Some(&query_params))
        .await
        .map_err(|error| map_octocrab_error(operation, &error))
}

pub(super) fn validate_per_page(per_page: u8) -> Result<(), IntakeError> {
    if per_page == 0 {
        return Err(IntakeError::InvalidPagination {
            message: "per_page must be at least 1".to_owned(),
        });
    }

    if per_page > MAX_PER_PAGE {
        return Err(IntakeError::InvalidPagination {
            message: format!("per_page must not exceed {MAX_PER_PAGE}"),
        });
    }

    Ok(())
}
