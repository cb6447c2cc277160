// Job listings: upstream Job API client, sorting, and display cards.
// All Job API calls go through `client::JobBoard`; handlers never build URLs.

pub mod cards;
pub mod client;
pub mod handlers;
pub mod sort;
