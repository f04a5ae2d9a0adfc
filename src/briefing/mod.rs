mod arg_parse;
mod config;
mod data_types;
mod dates;
mod dedup;
mod fetcher;
mod filter;
mod freshness;
mod github;
mod model;
mod personas;
mod pipeline;
mod prompt;
mod sender;

pub mod prelude {
    pub use super::arg_parse::*;
    pub use super::config::*;
    pub use super::data_types::*;
    pub use super::dates::*;
    pub use super::dedup::*;
    pub use super::fetcher::*;
    pub use super::filter::*;
    pub use super::freshness::*;
    pub use super::github::*;
    pub use super::model::*;
    pub use super::personas::*;
    pub use super::pipeline::*;
    pub use super::prompt::*;
    pub use super::sender::*;
    pub use regex::{Regex, RegexBuilder};
    pub use serde::{Deserialize, Serialize};
    pub use url::Url;
}
