use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A movie that can be rated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub movie_id: u64,
    pub title: String,
    /// Release date, serialized as `YYYY-MM-DD`
    pub released_on: NaiveDate,
    pub imdb_url: Option<String>,
}

/// Fields supplied when adding a movie to the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub released_on: NaiveDate,
    #[serde(default)]
    pub imdb_url: Option<String>,
}

impl Movie {
    /// Creates a movie with the given id
    pub fn new(movie_id: u64, new_movie: NewMovie) -> Self {
        Self {
            movie_id,
            title: new_movie.title,
            released_on: new_movie.released_on,
            imdb_url: new_movie.imdb_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_movie_deserializes_date() {
        let new_movie: NewMovie = serde_json::from_str(
            r#"{"title": "Toy Story (1995)", "released_on": "1995-01-01"}"#,
        )
        .unwrap();
        let movie = Movie::new(1, new_movie);

        assert_eq!(movie.title, "Toy Story (1995)");
        assert_eq!(movie.released_on, NaiveDate::from_ymd_opt(1995, 1, 1).unwrap());
        assert_eq!(movie.imdb_url, None);
    }

    #[test]
    fn test_movie_serializes_date() {
        let movie = Movie::new(
            2,
            NewMovie {
                title: "GoldenEye (1995)".to_string(),
                released_on: NaiveDate::from_ymd_opt(1995, 1, 1).unwrap(),
                imdb_url: None,
            },
        );
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["released_on"], "1995-01-01");
    }
}
