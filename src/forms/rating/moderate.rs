use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Approval {
    pub is_approved: bool,
    pub admin_response: Option<String>, // blank clears the stored response
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub is_verified: bool,
}
