/// Wire types for the admin city editor, a thin passthrough in front of the
/// Google Places API. Endpoints: `/api/admin/cities`,
/// `/api/admin/cities/search-google`.
use serde::Deserialize;

#[derive(Deserialize, Default, Debug)]
pub struct CitiesResponse {
    #[serde(default)]
    pub cities: Vec<WireCity>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WireCity {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: WireCityName,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub league_count: u32,
}

#[derive(Deserialize, Default, Debug)]
pub struct WireCityName {
    #[serde(default)]
    pub es: String,
    #[serde(default)]
    pub en: String,
}

#[derive(Deserialize, Default, Debug)]
pub struct CitySearchResponse {
    #[serde(default)]
    pub results: Vec<WirePlacePrediction>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WirePlacePrediction {
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub description: String,
}

// Clean records handed to the UI.

#[derive(Debug, Clone, Default)]
pub struct CityRecord {
    pub id: String,
    pub slug: String,
    pub display_name: String,
    pub province: String,
    pub status: String,
    pub league_count: u32,
}

#[derive(Debug, Clone, Default)]
pub struct CityCandidate {
    pub place_id: String,
    pub description: String,
}
