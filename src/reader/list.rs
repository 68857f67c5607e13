// src/reader/list.rs

use crate::config::Config;
use crate::fetch::Params;

use super::{push_opt, Reader};

/// Statistics table listing (`getSimpleStatsList`).
#[derive(Debug, Clone, Default)]
pub struct StatsListReader {
    config: Config,
    stats_code: Option<String>,
    search_word: Option<String>,
    survey_years: Option<String>,
    open_years: Option<String>,
    stats_field: Option<String>,
    collect_area: Option<u8>,
    updated_date: Option<String>,
    limit: Option<u32>,
    start_position: Option<u32>,
}

impl StatsListReader {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Government statistics code (5 or 8 digits).
    pub fn stats_code(mut self, code: impl Into<String>) -> Self {
        self.stats_code = Some(code.into());
        self
    }

    pub fn search_word(mut self, word: impl Into<String>) -> Self {
        self.search_word = Some(word.into());
        self
    }

    /// `yyyy`, `yyyymm` or `yyyymm-yyyymm`.
    pub fn survey_years(mut self, years: impl Into<String>) -> Self {
        self.survey_years = Some(years.into());
        self
    }

    pub fn open_years(mut self, years: impl Into<String>) -> Self {
        self.open_years = Some(years.into());
        self
    }

    pub fn stats_field(mut self, field: impl Into<String>) -> Self {
        self.stats_field = Some(field.into());
        self
    }

    /// 1 = national, 2 = prefecture, 3 = municipality.
    pub fn collect_area(mut self, area: u8) -> Self {
        self.collect_area = Some(area);
        self
    }

    pub fn updated_date(mut self, date: impl Into<String>) -> Self {
        self.updated_date = Some(date.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn start_position(mut self, pos: u32) -> Self {
        self.start_position = Some(pos);
        self
    }
}

impl Reader for StatsListReader {
    const QUERY: &'static str = "getSimpleStatsList";
    const TABLE_TAG: &'static str = "TABLE_INF";

    fn config(&self) -> &Config {
        &self.config
    }

    fn query_params(&self) -> Params {
        let mut params = Params::new();
        push_opt(&mut params, "statsCode", self.stats_code.as_ref());
        push_opt(&mut params, "searchWord", self.search_word.as_ref());
        push_opt(&mut params, "surveyYears", self.survey_years.as_ref());
        push_opt(&mut params, "openYears", self.open_years.as_ref());
        push_opt(&mut params, "statsField", self.stats_field.as_ref());
        push_opt(&mut params, "collectArea", self.collect_area);
        push_opt(&mut params, "updatedDate", self.updated_date.as_ref());
        push_opt(&mut params, "limit", self.limit);
        push_opt(&mut params, "startPosition", self.start_position);
        params
    }
}
