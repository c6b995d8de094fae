use serde::{Deserialize, Serialize};

use poi_shared::Pagination;

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageParams {
    pub fn pagination(&self) -> Option<Pagination> {
        Pagination::from_params(self.page, self.per_page)
    }
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: u64,
}

#[derive(Debug, Serialize)]
pub struct ExistsResponse {
    pub exists: bool,
}
