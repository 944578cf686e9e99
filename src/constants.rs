//! # System Constants
//!
//! Index names, cache lifetimes and sort-field mappings shared by the entity services
//! and the configuration defaults.

/// Search index names
pub mod indexes {
    pub const FILMS: &str = "movies";
    pub const GENRES: &str = "genres";
    pub const PERSONS: &str = "persons";
}

/// Cache lifetimes and namespaces
pub mod cache {
    /// Entity and response entries live five minutes
    pub const DEFAULT_TTL_SECONDS: u64 = 60 * 5;
    pub const DEFAULT_PREFIX: &str = "main";
    pub const RESPONSE_NAMESPACE: &str = "responses";
}

/// Public sort tokens and the backend fields they sort by.
///
/// Text fields sort on their `.raw` keyword sub-field.
pub mod ordering {
    pub const FILM_FIELDS: &[(&str, &str)] = &[
        ("id", "id"),
        ("title", "title.raw"),
        ("imdb_rating", "imdb_rating"),
    ];
    pub const GENRE_FIELDS: &[(&str, &str)] = &[("id", "id"), ("name", "name.raw")];
    pub const PERSON_FIELDS: &[(&str, &str)] = &[("id", "id"), ("name", "name.raw")];
}

/// Component names used for circuit breakers and log context
pub mod components {
    pub const SEARCH: &str = "search";
    pub const ENTITY_SERVICE: &str = "entity_service";
    pub const RESPONSE_CACHE: &str = "response_cache";
}
