use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::core::error::Result;
use crate::features::contributors::models::{
    ContributorFields, ContributorFilter, ContributorListQuery, ContributorSort, Pagination,
};

/// Query params for listing contributors
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContributorQueryParams {
    /// Items per page (0 = no limit)
    #[serde(default, deserialize_with = "empty_as_zero")]
    #[param(minimum = 0)]
    pub pagesize: u32,
    /// Page number, 1-indexed (0 = first page)
    #[serde(default, deserialize_with = "empty_as_zero")]
    #[param(minimum = 0)]
    pub pagenum: u32,
    /// Sort field: id, name, link or image (empty = by id)
    #[serde(default)]
    pub sort: String,
    /// Sort order: asc or desc (default: asc)
    #[serde(default)]
    pub order: String,
    /// Exact contributor id
    pub searchbyid: Option<String>,
    /// Case-sensitive substring of the name
    pub searchbyname: Option<String>,
}

/// Page values given as `pagesize=` read as 0; anything else must be a non-negative integer
fn empty_as_zero<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse().map_err(|_| {
        serde::de::Error::custom(format!("expected a non-negative integer, got '{}'", raw))
    })
}

impl ContributorQueryParams {
    /// Parses the raw parameters into a listing query, rejecting unknown sort
    /// fields, unknown orders and non-integer ids
    pub fn to_list_query(&self) -> Result<ContributorListQuery> {
        Ok(ContributorListQuery {
            pagination: Pagination::new(self.pagesize, self.pagenum),
            sort: ContributorSort::parse(&self.sort, &self.order)?,
            filter: ContributorFilter::parse(
                self.searchbyid.as_deref(),
                self.searchbyname.as_deref(),
            )?,
        })
    }
}

/// Request body for creating or updating a contributor
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ContributorRequestDto {
    /// Name to show on the dashboard (required)
    #[serde(default)]
    #[validate(length(min = 1, message = "name info is required"))]
    pub name: String,
    /// Profile URL
    #[serde(default)]
    pub link: Option<String>,
    /// Avatar image URL
    #[serde(default)]
    pub image: Option<String>,
}

impl From<ContributorRequestDto> for ContributorFields {
    fn from(dto: ContributorRequestDto) -> Self {
        Self {
            name: dto.name,
            profile_link: dto.link,
            image_link: dto.image,
        }
    }
}

/// Contributor as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContributorResponseDto {
    pub id: i64,
    pub name: String,
    /// Profile URL
    pub link: Option<String>,
    /// Avatar image URL
    pub image: Option<String>,
}
