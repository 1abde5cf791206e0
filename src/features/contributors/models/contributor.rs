use sqlx::FromRow;

use crate::features::contributors::dtos::ContributorResponseDto;

/// Database model for a row of the `contributors` relation
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Contributor {
    pub id: i64,
    /// Name shown on the dashboard
    pub name: String,
    /// Hyperlink to the contributor's profile
    #[sqlx(rename = "link")]
    pub profile_link: Option<String>,
    /// Avatar image URL
    #[sqlx(rename = "image")]
    pub image_link: Option<String>,
}

/// Field values written by create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorFields {
    pub name: String,
    pub profile_link: Option<String>,
    pub image_link: Option<String>,
}

impl ContributorFields {
    pub fn into_contributor(self, id: i64) -> Contributor {
        Contributor {
            id,
            name: self.name,
            profile_link: self.profile_link,
            image_link: self.image_link,
        }
    }
}

impl From<Contributor> for ContributorResponseDto {
    fn from(c: Contributor) -> Self {
        Self {
            id: c.id,
            name: c.name,
            link: c.profile_link,
            image: c.image_link,
        }
    }
}
