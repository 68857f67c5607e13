// src/reader/data.rs

use crate::config::Config;
use crate::fetch::Params;

use super::{push_opt, Reader};

/// Statistical data for one table (`getSimpleStatsData`).
#[derive(Debug, Clone)]
pub struct StatsDataReader {
    config: Config,
    stats_data_id: String,
    limit: Option<u32>,
    start_position: Option<u32>,
    meta_get: bool,
    cnt_get: bool,
}

impl StatsDataReader {
    pub fn new(config: Config, stats_data_id: impl Into<String>) -> Self {
        Self {
            config,
            stats_data_id: stats_data_id.into(),
            limit: None,
            start_position: None,
            meta_get: true,
            cnt_get: false,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn start_position(mut self, pos: u32) -> Self {
        self.start_position = Some(pos);
        self
    }

    /// Include class metadata (labels) alongside codes.
    pub fn meta_get(mut self, on: bool) -> Self {
        self.meta_get = on;
        self
    }

    /// Return only the row count instead of the data.
    pub fn cnt_get(mut self, on: bool) -> Self {
        self.cnt_get = on;
        self
    }
}

fn flag(on: bool) -> &'static str {
    if on {
        "Y"
    } else {
        "N"
    }
}

impl Reader for StatsDataReader {
    const QUERY: &'static str = "getSimpleStatsData";
    const TABLE_TAG: &'static str = "VALUE";

    fn config(&self) -> &Config {
        &self.config
    }

    fn query_params(&self) -> Params {
        let mut params = vec![
            ("statsDataId".to_string(), self.stats_data_id.clone()),
            ("metaGetFlg".to_string(), flag(self.meta_get).to_string()),
            ("cntGetFlg".to_string(), flag(self.cnt_get).to_string()),
        ];
        push_opt(&mut params, "limit", self.limit);
        push_opt(&mut params, "startPosition", self.start_position);
        params
    }
}
