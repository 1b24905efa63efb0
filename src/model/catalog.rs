use serde::{Deserialize, Serialize};

/// A meal as returned by the external catalog.
///
/// Field names follow the catalog's wire format (`idMeal`, `strMeal`, ...). The
/// filter endpoints only return the id, name and thumbnail, so category and area
/// are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal", default)]
    pub name: String,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: String,
    #[serde(rename = "strCategory", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "strArea", default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
}

impl CatalogItem {
    /// Creates a new CatalogItem with no category or area.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            thumbnail: String::new(),
            category: None,
            area: None,
        }
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = thumbnail.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }
}

/// Filter state of the browse page. Empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub area: Option<String>,
}

impl BrowseFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn area(area: impl Into<String>) -> Self {
        Self {
            area: Some(area.into()),
            ..Self::default()
        }
    }
}
