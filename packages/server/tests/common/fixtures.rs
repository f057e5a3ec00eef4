//! Test fixtures for seeding stores.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use personnel_core::common::EmployeeId;
use personnel_core::domains::assignments::models::Assignment;
use personnel_core::domains::departments::models::Department;
use personnel_core::domains::employees::models::{Employee, Gender};
use personnel_core::domains::salaries::models::Salary;
use personnel_core::kernel::{InMemoryStore, ServerDeps};
use personnel_core::seed::SeedData;
use serde_json::{json, Value};

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("Invalid fixture date")
}

/// Path of the bundled sample data set.
pub fn sample_data_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/sample_personnel.json")
}

pub fn employee(id: i32, first_name: &str, last_name: &str) -> Employee {
    Employee {
        id: EmployeeId::from_raw(id),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        gender: Gender::Male,
        birth_date: date("1953-09-02"),
        hire_date: date("1986-06-26"),
    }
}

pub fn department(id: &str, name: &str) -> Department {
    Department {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub fn assignment(employee_id: i32, department_id: &str, from: &str, to: &str) -> Assignment {
    Assignment {
        employee_id: EmployeeId::from_raw(employee_id),
        department_id: department_id.to_string(),
        from_date: date(from),
        to_date: date(to),
    }
}

pub fn salary(employee_id: i32, amount: i32, from: &str, to: &str) -> Salary {
    Salary {
        employee_id: EmployeeId::from_raw(employee_id),
        amount,
        from_date: date(from),
        to_date: date(to),
    }
}

/// Request body for creating an employee.
pub fn new_employee_json(id: i32, first_name: &str, last_name: &str) -> Value {
    json!({
        "id": id,
        "first_name": first_name,
        "last_name": last_name,
        "gender": "F",
        "birth_date": "1964-06-02",
        "hire_date": "1985-11-21"
    })
}

/// Empty in-memory deps.
pub fn empty_deps() -> ServerDeps {
    ServerDeps::in_memory(Arc::new(InMemoryStore::new()))
}

/// In-memory deps with Marketing (d001), employee 10001 assigned to it from
/// 2000-01-01 to 2010-01-01, and employee 10002 who is never assigned.
pub async fn marketing_deps() -> ServerDeps {
    let deps = empty_deps();
    deps.departments
        .insert(&department("d001", "Marketing"))
        .await
        .expect("Failed to insert department");
    deps.employees
        .insert(&employee(10001, "Georgi", "Facello"))
        .await
        .expect("Failed to insert employee");
    deps.employees
        .insert(&employee(10002, "Bezalel", "Simmel"))
        .await
        .expect("Failed to insert employee");
    deps.assignments
        .insert(&assignment(10001, "d001", "2000-01-01", "2010-01-01"))
        .await
        .expect("Failed to insert assignment");
    deps
}

/// `marketing_deps` plus pay for 10001 of 60000 from 2000-01-01 to
/// 2005-10-10 and 65000 from 2005-10-10 to 2010-01-01.
pub async fn salaried_marketing_deps() -> ServerDeps {
    let deps = marketing_deps().await;
    for pay in [
        salary(10001, 60000, "2000-01-01", "2005-10-10"),
        salary(10001, 65000, "2005-10-10", "2010-01-01"),
    ] {
        deps.salaries
            .insert(&pay)
            .await
            .expect("Failed to insert salary");
    }
    deps
}

/// In-memory deps loaded from the bundled sample data set.
pub async fn sample_deps() -> ServerDeps {
    let deps = empty_deps();
    SeedData::from_file(&sample_data_path())
        .expect("Failed to read sample data")
        .load_into(&deps)
        .await
        .expect("Failed to load sample data");
    deps
}
