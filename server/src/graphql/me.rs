use async_graphql::SimpleObject;
use products_hr::Employee;

use crate::graphql::employees::EmployeeNode;

/// The employee the current user picked as themselves. The stored id is not
/// checked against the roster, so `employee` is null when it went stale.
#[derive(Clone, Debug, SimpleObject)]
pub struct MePayload {
    pub emp_id: Option<String>,
    pub employee: Option<EmployeeNode>,
}

impl MePayload {
    pub fn resolve(emp_id: Option<String>, roster: Vec<Employee>) -> Self {
        let employee = emp_id.as_ref().and_then(|id| {
            roster
                .into_iter()
                .find(|employee| employee.emp_id == *id)
                .map(EmployeeNode::from)
        });
        Self { emp_id, employee }
    }
}
