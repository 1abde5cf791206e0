pub mod contributor;
pub mod list_query;

pub use contributor::{Contributor, ContributorFields};
pub use list_query::{
    ContributorFilter, ContributorListQuery, ContributorPage, ContributorSort, Pagination,
    SortField,
};
