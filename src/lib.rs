//! Client for the e-Stat statistics API.
//!
//! A [`reader::Reader`] builds the request for one endpoint, fetches the
//! simple-CSV body and hands it to [`parse::parse_response_text`], which splits
//! the metadata lines from the table section.

pub mod config;
pub mod fetch;
pub mod parse;
pub mod reader;
pub mod response;

pub use config::Config;
pub use parse::{parse_response_text, ParsedResponse, TABLE_KEY};
pub use reader::{Reader, StatsDataReader, StatsListReader};
pub use response::StatsResponse;
