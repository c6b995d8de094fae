use serde::Deserialize;

use poi_core::domain::OrganizationChanges;

#[derive(Debug, Deserialize)]
pub struct CreateOrganizationRequest {
    pub name: String,
    pub code: Option<String>,
    pub org_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateOrganizationRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub org_type: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateOrganizationRequest> for OrganizationChanges {
    fn from(req: UpdateOrganizationRequest) -> Self {
        Self {
            name: req.name,
            code: req.code,
            org_type: req.org_type,
            is_active: req.is_active,
        }
    }
}
