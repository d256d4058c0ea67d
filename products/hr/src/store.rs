use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::{
    error::{HrError, HrResult},
    record::Employee,
    schema::{Column, HeaderStyle, header_titles, is_blank_header},
    sheet::Sheet,
};

/// Result of [`EmployeeStore::initialize`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InitOutcome {
    Created,
    /// The status column was moved from `from` to its canonical index.
    Migrated { from: usize, to: usize },
    AlreadyInitialized,
}

impl InitOutcome {
    pub fn notice(&self) -> &'static str {
        match self {
            InitOutcome::Created => "Employee sheet created.",
            InitOutcome::Migrated { .. } => "Employee sheet header updated: Status column moved.",
            InitOutcome::AlreadyInitialized => "Employee sheet is already initialized.",
        }
    }
}

/// CRUD over the employee sheet. Each operation holds the table lock for its
/// whole read-modify-write.
pub struct EmployeeStore {
    sheet: Arc<dyn Sheet>,
    lock: Mutex<()>,
}

impl EmployeeStore {
    pub fn new(sheet: Arc<dyn Sheet>) -> Self {
        Self {
            sheet,
            lock: Mutex::new(()),
        }
    }

    #[instrument(name = "hr.employees.list", skip_all)]
    pub async fn list(&self) -> HrResult<Vec<Employee>> {
        let _guard = self.lock.lock().await;
        self.read_records().await
    }

    #[instrument(name = "hr.employees.get", skip(self))]
    pub async fn get(&self, emp_id: &str) -> HrResult<Option<Employee>> {
        let _guard = self.lock.lock().await;
        Ok(self
            .read_records()
            .await?
            .into_iter()
            .find(|employee| employee.emp_id == emp_id))
    }

    #[instrument(name = "hr.employees.add", skip_all, fields(emp_id = %employee.emp_id))]
    pub async fn add(&self, employee: Employee) -> HrResult<()> {
        let _guard = self.lock.lock().await;
        let existing = self.read_records().await?;
        if existing.iter().any(|e| e.emp_id == employee.emp_id) {
            return Err(HrError::DuplicateKey(employee.emp_id));
        }
        self.sheet.append_row(employee.to_row()).await?;
        info!("employee added");
        Ok(())
    }

    #[instrument(
        name = "hr.employees.update",
        skip(self, employee),
        fields(emp_id = %employee.emp_id)
    )]
    pub async fn update(&self, employee: Employee, original_emp_id: &str) -> HrResult<()> {
        let _guard = self.lock.lock().await;
        let keys = self.sheet.column(Column::EmpId.index()).await?;
        let position = locate(&keys, original_emp_id)
            .ok_or_else(|| HrError::NotFound(original_emp_id.to_string()))?;
        if employee.emp_id != original_emp_id && keys.iter().any(|key| *key == employee.emp_id) {
            return Err(HrError::DuplicateKey(employee.emp_id));
        }
        self.sheet.write_row(position, employee.to_row()).await?;
        info!(position, "employee updated");
        Ok(())
    }

    #[instrument(name = "hr.employees.delete", skip(self))]
    pub async fn delete(&self, emp_id: &str) -> HrResult<()> {
        let _guard = self.lock.lock().await;
        let keys = self.sheet.column(Column::EmpId.index()).await?;
        let position =
            locate(&keys, emp_id).ok_or_else(|| HrError::NotFound(emp_id.to_string()))?;
        self.sheet.delete_row(position).await?;
        info!(position, "employee deleted");
        Ok(())
    }

    /// Replace the whole table. Duplicate ids in `employees` are written as given.
    #[instrument(name = "hr.employees.save_all", skip_all, fields(count = employees.len()))]
    pub async fn save_all(&self, employees: Vec<Employee>) -> HrResult<()> {
        let _guard = self.lock.lock().await;
        self.sheet.write_header(&header_titles(), None).await?;
        self.sheet.clear_rows().await?;
        let rows = employees.iter().map(Employee::to_row).collect::<Vec<_>>();
        if !rows.is_empty() {
            self.sheet.write_rows(rows).await?;
        }
        info!("employee table replaced");
        Ok(())
    }

    /// Create the header row, or move a misplaced status column (header and
    /// data cells) to its canonical index. Narrow sheets are padded to the
    /// canonical width first. The move is written through [`Sheet::replace`],
    /// so a failed run leaves the sheet as it was.
    #[instrument(name = "hr.employees.initialize", skip_all)]
    pub async fn initialize(&self) -> HrResult<InitOutcome> {
        let _guard = self.lock.lock().await;
        let header = self.sheet.header().await?;
        if is_blank_header(&header) {
            self.sheet
                .write_header(&header_titles(), Some(&HeaderStyle::default()))
                .await?;
            info!("employee sheet header created");
            return Ok(InitOutcome::Created);
        }

        let canonical = Column::Status.index();
        let Some(current) = header.iter().position(|cell| Column::Status.matches_title(cell))
        else {
            debug!("header has no status column; leaving as is");
            return Ok(InitOutcome::AlreadyInitialized);
        };
        if current == canonical {
            return Ok(InitOutcome::AlreadyInitialized);
        }

        let width = header.len().max(Column::ALL.len());
        let mut moved_header = header;
        moved_header.resize(width, String::new());
        relocate(&mut moved_header, current, canonical);
        let rows = self
            .sheet
            .rows()
            .await?
            .into_iter()
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, String::new());
                }
                relocate(&mut row, current, canonical);
                row
            })
            .collect::<Vec<_>>();

        self.sheet.replace(&moved_header, rows).await?;
        info!(from = current, to = canonical, "status column relocated");
        Ok(InitOutcome::Migrated {
            from: current,
            to: canonical,
        })
    }

    async fn read_records(&self) -> HrResult<Vec<Employee>> {
        Ok(self
            .sheet
            .rows()
            .await?
            .iter()
            .filter(|row| row.first().is_some_and(|key| !key.is_empty()))
            .map(|row| Employee::from_row(row))
            .collect())
    }
}

fn locate(keys: &[String], emp_id: &str) -> Option<usize> {
    if emp_id.is_empty() {
        return None;
    }
    keys.iter().position(|key| key == emp_id)
}

fn relocate(cells: &mut Vec<String>, from: usize, to: usize) {
    let value = cells.remove(from);
    cells.insert(to, value);
}
