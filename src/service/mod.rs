//! PersonService: person operations over an injected store.

mod people;
pub use people::PersonService;
