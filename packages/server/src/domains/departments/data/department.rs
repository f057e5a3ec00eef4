use serde::{Deserialize, Serialize};

use crate::domains::departments::models::department::Department as DepartmentModel;

/// Department JSON type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentData {
    /// Four-character department code, e.g. `d001`
    pub id: String,
    pub name: String,
}

impl From<DepartmentModel> for DepartmentData {
    fn from(department: DepartmentModel) -> Self {
        Self {
            id: department.id,
            name: department.name,
        }
    }
}

impl From<DepartmentData> for DepartmentModel {
    fn from(data: DepartmentData) -> Self {
        Self {
            id: data.id,
            name: data.name,
        }
    }
}
