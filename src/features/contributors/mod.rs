//! Contributors shown on the dashboard.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/v1/contributor` | No | List with pagination, sorting and search |
//! | POST | `/api/v1/contributor` | No | Create contributor |
//! | PATCH | `/api/v1/contributor/{id}` | No | Replace name, link and image |
//! | DELETE | `/api/v1/contributor/{id}` | No | Delete contributor |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{ContributorStore, MemoryContributorStore, PgContributorStore};
pub use services::ContributorService;
