//! # Entity Services
//!
//! Cache-aside read services for films, genres and persons, all built on the generic
//! [`EntityService`].

pub mod entity_service;
pub mod film;
pub mod genre;
pub mod person;

pub use entity_service::{EntityReader, EntityService};
pub use film::{film_filter_set, film_service, FilmService};
pub use genre::{genre_filter_set, genre_service, GenreService};
pub use person::{person_filter_set, person_service, PersonService};
