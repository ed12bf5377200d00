//! Employee (empleado) service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::Employee;

/// Employee service
#[derive(Clone)]
pub struct EmployeeService {
    db: PgPool,
}

/// Database row for an employee
#[derive(Debug, FromRow)]
struct EmployeeRow {
    id: Uuid,
    name: String,
    surname: String,
    email: String,
    phone: Option<String>,
    role: Option<String>,
    area: Option<String>,
    hired_at: DateTime<Utc>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            name: row.name,
            surname: row.surname,
            email: row.email,
            phone: row.phone,
            role: row.role,
            area: row.area,
            hired_at: row.hired_at,
        }
    }
}

/// Input for creating an employee
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEmployeeInput {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub surname: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub area: Option<String>,
}

/// Input for updating an employee
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEmployeeInput {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub area: Option<String>,
}

const EMPLOYEE_COLUMNS: &str = "id, name, surname, email, phone, role, area, hired_at";

impl EmployeeService {
    /// Create a new EmployeeService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all employees
    pub async fn list(&self) -> AppResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {} FROM employees ORDER BY surname, name",
            EMPLOYEE_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Employee::from).collect())
    }

    /// Get an employee by id
    pub async fn get(&self, id: Uuid) -> AppResult<Employee> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {} FROM employees WHERE id = $1",
            EMPLOYEE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Empleado".to_string()))?;

        Ok(row.into())
    }

    /// Create a new employee
    pub async fn create(&self, input: CreateEmployeeInput) -> AppResult<Employee> {
        input.validate().map_err(|e| AppError::Validation {
            field: "employee".to_string(),
            message: e.to_string(),
            message_es: "Datos de empleado inválidos".to_string(),
        })?;

        let email = input.email.trim().to_lowercase();

        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE email = $1")
                .bind(&email)
                .fetch_one(&self.db)
                .await?;

        if existing > 0 {
            return Err(AppError::DuplicateEntry("email".to_string()));
        }

        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            r#"
            INSERT INTO employees (name, surname, email, phone, role, area)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            EMPLOYEE_COLUMNS
        ))
        .bind(&input.name)
        .bind(&input.surname)
        .bind(&email)
        .bind(&input.phone)
        .bind(&input.role)
        .bind(&input.area)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Update an employee
    pub async fn update(&self, id: Uuid, input: UpdateEmployeeInput) -> AppResult<Employee> {
        let email = input.email.as_deref().map(|e| e.trim().to_lowercase());

        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            r#"
            UPDATE employees
            SET name = COALESCE($2, name),
                surname = COALESCE($3, surname),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                role = COALESCE($6, role),
                area = COALESCE($7, area)
            WHERE id = $1
            RETURNING {}
            "#,
            EMPLOYEE_COLUMNS
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.surname)
        .bind(&email)
        .bind(&input.phone)
        .bind(&input.role)
        .bind(&input.area)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Empleado".to_string()))?;

        Ok(row.into())
    }

    /// Delete an employee
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Empleado".to_string()));
        }

        Ok(())
    }
}
