use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::{EmployeeId, PersonnelError, PersonnelResult};
use crate::domains::employees::models::employee::{Employee as EmployeeModel, Gender};

/// Employee JSON type
///
/// Public API representation of an employee (REST responses)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeData {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub hire_date: NaiveDate,
}

impl From<EmployeeModel> for EmployeeData {
    fn from(employee: EmployeeModel) -> Self {
        Self {
            id: employee.id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            gender: employee.gender,
            birth_date: employee.birth_date,
            hire_date: employee.hire_date,
        }
    }
}

/// Create request body
///
/// Every field is optional on the wire so a missing field is reported as a
/// validation failure naming it, not as a JSON rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewEmployeeInput {
    pub id: Option<EmployeeId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub hire_date: Option<NaiveDate>,
}

impl NewEmployeeInput {
    /// Builds the model, listing every missing field on failure.
    pub fn into_employee(self) -> PersonnelResult<EmployeeModel> {
        let mut missing = Vec::new();
        if self.id.is_none() {
            missing.push("id");
        }
        if self.first_name.is_none() {
            missing.push("first_name");
        }
        if self.last_name.is_none() {
            missing.push("last_name");
        }
        if self.gender.is_none() {
            missing.push("gender");
        }
        if self.birth_date.is_none() {
            missing.push("birth_date");
        }
        if self.hire_date.is_none() {
            missing.push("hire_date");
        }

        match (
            self.id,
            self.first_name,
            self.last_name,
            self.gender,
            self.birth_date,
            self.hire_date,
        ) {
            (
                Some(id),
                Some(first_name),
                Some(last_name),
                Some(gender),
                Some(birth_date),
                Some(hire_date),
            ) => Ok(EmployeeModel {
                id,
                first_name,
                last_name,
                gender,
                birth_date,
                hire_date,
            }),
            _ => Err(PersonnelError::Validation(missing)),
        }
    }
}

/// Partial update body
///
/// Only fields present in the request overwrite stored values. There is no
/// `id` field: the identifier is immutable, and an `id` in the body is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub hire_date: Option<NaiveDate>,
}

impl EmployeePatch {
    pub fn apply_to(self, employee: &mut EmployeeModel) {
        if let Some(first_name) = self.first_name {
            employee.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            employee.last_name = last_name;
        }
        if let Some(gender) = self.gender {
            employee.gender = gender;
        }
        if let Some(birth_date) = self.birth_date {
            employee.birth_date = birth_date;
        }
        if let Some(hire_date) = self.hire_date {
            employee.hire_date = hire_date;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.gender.is_none()
            && self.birth_date.is_none()
            && self.hire_date.is_none()
    }
}
