//! Response envelope used by todo creation

use serde::Serialize;

/// `{ "status": "success", "data": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseResponse<T> {
    pub status: String,
    pub data: T,
}

impl<T> BaseResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_owned(),
            data,
        }
    }
}
