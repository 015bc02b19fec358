use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub movie_id: i64,
    pub movie_name: String,
    pub release_year: Option<i64>,
    pub movie_duration: Option<i64>,
    pub movie_rating: Option<f64>,
    pub movie_genre: Option<String>,
}
