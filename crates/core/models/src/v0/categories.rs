use std::fmt;
use std::str::FromStr;

use civic_result::{create_error, Error};

use super::Report;

auto_derived!(
    /// Kind of civic issue a report describes
    #[derive(Copy, Hash)]
    pub enum Category {
        Traffic,
        #[cfg_attr(feature = "serde", serde(rename = "Road Damage"))]
        RoadDamage,
        #[cfg_attr(feature = "serde", serde(rename = "Water Drainage"))]
        WaterDrainage,
        #[cfg_attr(feature = "serde", serde(rename = "Tree Fallen"))]
        TreeFallen,
        #[cfg_attr(feature = "serde", serde(rename = "Street Light Issue"))]
        StreetLightIssue,
        Garbage,
        Construction,
        #[cfg_attr(feature = "serde", serde(rename = "Public Property Damage"))]
        PublicPropertyDamage,
        Others,
    }

    /// Category selection applied to a list of reports
    #[derive(Copy, Default)]
    pub enum CategoryFilter {
        /// Show every report
        #[default]
        All,
        /// Show only reports in the given category
        Only(Category),
    }
);

impl Category {
    /// Every category a report may be filed under
    pub const ALL: [Category; 9] = [
        Category::Traffic,
        Category::RoadDamage,
        Category::WaterDrainage,
        Category::TreeFallen,
        Category::StreetLightIssue,
        Category::Garbage,
        Category::Construction,
        Category::PublicPropertyDamage,
        Category::Others,
    ];

    /// Human readable name, also used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Traffic => "Traffic",
            Category::RoadDamage => "Road Damage",
            Category::WaterDrainage => "Water Drainage",
            Category::TreeFallen => "Tree Fallen",
            Category::StreetLightIssue => "Street Light Issue",
            Category::Garbage => "Garbage",
            Category::Construction => "Construction",
            Category::PublicPropertyDamage => "Public Property Damage",
            Category::Others => "Others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase and drop separators so "Road Damage", "road-damage" and "road_damage" compare equal
fn normalise(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = normalise(s);
        Category::ALL
            .into_iter()
            .find(|category| normalise(category.as_str()) == needle)
            .ok_or_else(|| {
                create_error!(FailedValidation {
                    error: format!("Unknown category: {s}")
                })
            })
    }
}

impl CategoryFilter {
    /// Whether a report in the given category passes this filter
    pub fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }

    /// Select the reports passing this filter, keeping their order
    pub fn apply<'a>(&self, reports: &'a [Report]) -> Vec<&'a Report> {
        reports
            .iter()
            .filter(|report| self.matches(&report.category))
            .collect()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(category) => category.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if normalise(s) == "all" {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}
