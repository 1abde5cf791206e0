pub mod contributor_dto;

pub use contributor_dto::{ContributorQueryParams, ContributorRequestDto, ContributorResponseDto};
