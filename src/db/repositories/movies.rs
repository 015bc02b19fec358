use anyhow::{Context, Result};
use rusqlite::{params, Row};

use crate::db::{connection::Database, models::Movie};

fn row_to_movie(row: &Row) -> Result<Movie, rusqlite::Error> {
    Ok(Movie {
        movie_id: row.get("movie_id")?,
        movie_name: row.get("movie_name")?,
        release_year: row.get("release_year")?,
        movie_duration: row.get("movie_duration")?,
        movie_rating: row.get("movie_rating")?,
        movie_genre: row.get("movie_genre")?,
    })
}

impl Database {
    pub async fn insert_movie(
        &self,
        name: &str,
        release_year: Option<i64>,
        duration: Option<i64>,
        rating: Option<f64>,
        genre: Option<&str>,
    ) -> Result<i64> {
        let name = name.to_string();
        let genre = genre.map(str::to_string);
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO movies (movie_name, release_year, movie_duration, movie_rating, movie_genre)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![name, release_year, duration, rating, genre],
            )
            .with_context(|| "failed to insert movie")?;
            Ok(conn.last_insert_rowid())
        })
        .await
    }

    pub async fn list_movies(&self) -> Result<Vec<Movie>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT movie_id, movie_name, release_year, movie_duration, movie_rating, movie_genre
                 FROM movies
                 ORDER BY movie_id ASC",
            )?;

            let rows = stmt.query_map([], row_to_movie)?;
            let mut movies = Vec::new();
            for movie in rows {
                movies.push(movie?);
            }

            Ok(movies)
        })
        .await
    }
}
