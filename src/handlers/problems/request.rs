//! Problem request DTOs

use serde::Deserialize;
use validator::Validate;

/// List problems query parameters
#[derive(Debug, Deserialize, Validate)]
pub struct ListProblemsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,

    /// Title substring, or an exact problem id when numeric
    #[validate(length(max = 80))]
    pub keyword: Option<String>,

    /// Comma-separated tag ids; a problem must carry all of them
    pub tag_ids: Option<String>,

    /// One of `id`, `title`, `ac_num`, `submit_num`, `ac_rate`,
    /// `publicize_time`
    pub sort: Option<String>,
    /// `asc` or `desc`
    pub order: Option<String>,
}

impl ListProblemsQuery {
    /// Parse the comma-separated tag id list; non-numeric entries are
    /// rejected by the caller
    pub fn parsed_tag_ids(&self) -> Result<Vec<i32>, String> {
        let Some(raw) = self.tag_ids.as_deref() else {
            return Ok(Vec::new());
        };

        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<i32>().map_err(|_| s.to_string()))
            .collect()
    }
}

/// Problem statistics query parameters
#[derive(Debug, Deserialize)]
pub struct StatisticsQuery {
    /// One of `fastest`, `shortest`, `earliest`
    pub order: Option<String>,
}
