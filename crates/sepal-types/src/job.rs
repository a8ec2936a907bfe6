use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::{EnumDisplay, deserialize_lenient_datetime};
use crate::page::PagedEntity;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Job {
    pub job_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub job_type: EnumDisplay,
    pub status: EnumDisplay,
    #[serde(deserialize_with = "deserialize_lenient_datetime")]
    pub execution_time: Option<NaiveDateTime>,
    /// `None` while the job is still running
    #[serde(deserialize_with = "deserialize_lenient_datetime")]
    pub completion_time: Option<NaiveDateTime>,
}

impl Job {
    pub const fn is_in_progress(&self) -> bool {
        self.completion_time.is_none()
    }
}

impl PagedEntity for Job {
    const ITEMS_KEY: &'static str = "jobs";
    const TOTAL_KEY: &'static str = "totalJobs";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Page;
    use serde_json::json;

    #[test]
    fn test_jobs_page_with_running_job() {
        let page = Page::<Job>::decode(json!({
            "page": 0,
            "pageSize": 10,
            "totalPages": 1,
            "totalElements": 1,
            "jobs": [{
                "jobId": "J-9",
                "name": "Fetch market news",
                "type": { "code": "FETCH_MARKET_NEWS", "label": "Fetch Market News" },
                "status": { "code": "IN_PROGRESS", "label": "In Progress" },
                "executionTime": "2024-02-01T08:00:00",
                "completionTime": null
            }]
        }));

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].job_type.code, "FETCH_MARKET_NEWS");
        assert!(page.items[0].is_in_progress());
    }
}
