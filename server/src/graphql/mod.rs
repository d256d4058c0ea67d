pub mod employees;
pub mod me;

use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Schema};
use platform_api::ApiError;
use products_hr::{HrError, HrModule};
use tracing::{error, instrument, warn};

use self::{
    employees::{EmployeeInput, EmployeeNode, InitializePayload, MessagePayload, PhotoPayload},
    me::MePayload,
};

pub type SchemaType = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(module: HrModule) -> SchemaType {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(Arc::new(module))
        .finish()
}

#[derive(Default)]
pub struct QueryRoot;

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl QueryRoot {
    #[instrument(name = "graphql.employees", skip_all)]
    async fn employees(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<EmployeeNode>> {
        let hr = module(ctx)?;
        let employees = hr.employees.list().await.map_err(hr_error)?;
        Ok(employees.into_iter().map(EmployeeNode::from).collect())
    }

    #[instrument(name = "graphql.employee", skip(self, ctx))]
    async fn employee(
        &self,
        ctx: &Context<'_>,
        emp_id: String,
    ) -> async_graphql::Result<Option<EmployeeNode>> {
        let hr = module(ctx)?;
        let found = hr.employees.get(&emp_id).await.map_err(hr_error)?;
        Ok(found.map(EmployeeNode::from))
    }

    #[instrument(name = "graphql.positions_list", skip_all)]
    async fn positions_list(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<String>> {
        let hr = module(ctx)?;
        hr.settings.positions_list().await.map_err(hr_error)
    }

    #[instrument(name = "graphql.me_employee_id", skip_all)]
    async fn me_employee_id(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<String>> {
        let hr = module(ctx)?;
        hr.settings.me_employee_id().await.map_err(hr_error)
    }

    #[instrument(name = "graphql.me", skip_all)]
    async fn me(&self, ctx: &Context<'_>) -> async_graphql::Result<MePayload> {
        let hr = module(ctx)?;
        let emp_id = hr.settings.me_employee_id().await.map_err(hr_error)?;
        let roster = match emp_id {
            Some(_) => hr.employees.list().await.map_err(hr_error)?,
            None => Vec::new(),
        };
        Ok(MePayload::resolve(emp_id, roster))
    }

    #[instrument(name = "graphql.version", skip_all)]
    async fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

#[Object]
impl MutationRoot {
    #[instrument(name = "graphql.add_employee", skip_all)]
    async fn add_employee(
        &self,
        ctx: &Context<'_>,
        employee: EmployeeInput,
    ) -> async_graphql::Result<MessagePayload> {
        let hr = module(ctx)?;
        hr.employees
            .add(employee.into())
            .await
            .map_err(hr_error)?;
        Ok(MessagePayload::new("Employee added"))
    }

    #[instrument(name = "graphql.update_employee", skip(self, ctx, employee))]
    async fn update_employee(
        &self,
        ctx: &Context<'_>,
        employee: EmployeeInput,
        original_emp_id: String,
    ) -> async_graphql::Result<MessagePayload> {
        let hr = module(ctx)?;
        hr.employees
            .update(employee.into(), &original_emp_id)
            .await
            .map_err(hr_error)?;
        Ok(MessagePayload::new("Employee updated"))
    }

    #[instrument(name = "graphql.delete_employee", skip(self, ctx))]
    async fn delete_employee(
        &self,
        ctx: &Context<'_>,
        emp_id: String,
    ) -> async_graphql::Result<MessagePayload> {
        let hr = module(ctx)?;
        hr.employees.delete(&emp_id).await.map_err(hr_error)?;
        Ok(MessagePayload::new("Employee deleted"))
    }

    #[instrument(name = "graphql.save_all_employees", skip_all)]
    async fn save_all_employees(
        &self,
        ctx: &Context<'_>,
        employees: Vec<EmployeeInput>,
    ) -> async_graphql::Result<MessagePayload> {
        let hr = module(ctx)?;
        let count = employees.len();
        hr.employees
            .save_all(employees.into_iter().map(Into::into).collect())
            .await
            .map_err(hr_error)?;
        Ok(MessagePayload::new(format!("Saved {count} employees")))
    }

    #[instrument(name = "graphql.save_positions_list", skip_all)]
    async fn save_positions_list(
        &self,
        ctx: &Context<'_>,
        positions: Vec<String>,
    ) -> async_graphql::Result<Vec<String>> {
        let hr = module(ctx)?;
        hr.settings
            .save_positions_list(positions)
            .await
            .map_err(hr_error)
    }

    #[instrument(name = "graphql.set_me_employee_id", skip(self, ctx))]
    async fn set_me_employee_id(
        &self,
        ctx: &Context<'_>,
        emp_id: String,
    ) -> async_graphql::Result<bool> {
        let hr = module(ctx)?;
        hr.settings
            .set_me_employee_id(&emp_id)
            .await
            .map_err(hr_error)?;
        Ok(true)
    }

    #[instrument(name = "graphql.clear_me_employee_id", skip_all)]
    async fn clear_me_employee_id(&self, ctx: &Context<'_>) -> async_graphql::Result<bool> {
        let hr = module(ctx)?;
        hr.settings.clear_me_employee_id().await.map_err(hr_error)?;
        Ok(true)
    }

    #[instrument(name = "graphql.upload_employee_photo", skip(self, ctx, payload))]
    async fn upload_employee_photo(
        &self,
        ctx: &Context<'_>,
        payload: String,
        file_name: Option<String>,
        emp_id: String,
    ) -> async_graphql::Result<PhotoPayload> {
        let hr = module(ctx)?;
        let upload = hr
            .photos
            .upload(&payload, file_name.as_deref(), &emp_id)
            .await
            .map_err(hr_error)?;
        Ok(upload.into())
    }

    #[instrument(name = "graphql.initialize_sheet", skip_all)]
    async fn initialize_sheet(&self, ctx: &Context<'_>) -> async_graphql::Result<InitializePayload> {
        let hr = module(ctx)?;
        let outcome = hr.employees.initialize().await.map_err(hr_error)?;
        Ok(outcome.into())
    }
}

fn module(ctx: &Context<'_>) -> async_graphql::Result<Arc<HrModule>> {
    ctx.data::<Arc<HrModule>>()
        .cloned()
        .map_err(|_| ApiError::store_failure(anyhow::anyhow!("missing HR module")).extend())
}

fn api_error(err: HrError) -> ApiError {
    let message = err.to_string();
    match err {
        HrError::DuplicateKey(_) => ApiError::DuplicateKey(message),
        HrError::NotFound(_) => ApiError::NotFound(message),
        HrError::InvalidPayload(_) => ApiError::InvalidPayload(message),
        HrError::StoreFailure(source) => ApiError::store_failure(source),
    }
}

fn hr_error(err: HrError) -> async_graphql::Error {
    match &err {
        HrError::StoreFailure(source) => error!(error = ?source, "roster store failure"),
        other => warn!(code = other.kind().as_str(), error = %other, "roster request rejected"),
    }
    api_error(err).extend()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::{Request, Variables};
    use serde_json::{Value, json};

    fn schema() -> SchemaType {
        build_schema(HrModule::in_memory("http://roster.test"))
    }

    async fn run(schema: &SchemaType, query: &str, vars: Value) -> async_graphql::Response {
        schema
            .execute(Request::new(query).variables(Variables::from_json(vars)))
            .await
    }

    fn error_code(response: &async_graphql::Response) -> Option<String> {
        let err = response.errors.first()?;
        match err.extensions.as_ref()?.get("code")? {
            async_graphql::Value::String(code) => Some(code.clone()),
            _ => None,
        }
    }

    const ADD: &str = r#"
        mutation Add($employee: EmployeeInput!) {
            addEmployee(employee: $employee) { message }
        }
    "#;
    const LIST: &str = "{ employees { empId firstName lastName status photoUrl } }";

    #[tokio::test]
    async fn duplicate_add_surfaces_coded_error() {
        let schema = schema();
        let ok = run(&schema, ADD, json!({"employee": {"empId": "E1", "firstName": "Jo"}})).await;
        assert!(ok.errors.is_empty(), "{:?}", ok.errors);
        assert_eq!(
            ok.data.into_json().unwrap(),
            json!({"addEmployee": {"message": "Employee added"}})
        );

        let dup = run(&schema, ADD, json!({"employee": {"empId": "E1", "firstName": "Amy"}})).await;
        assert_eq!(error_code(&dup).as_deref(), Some("DUPLICATE_KEY"));

        let listed = run(&schema, LIST, json!({})).await;
        assert_eq!(
            listed.data.into_json().unwrap(),
            json!({"employees": [
                {"empId": "E1", "firstName": "Jo", "lastName": "", "status": "", "photoUrl": ""}
            ]})
        );
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_keys() {
        let schema = schema();
        let update = run(
            &schema,
            r#"mutation { updateEmployee(employee: {empId: "E2"}, originalEmpId: "E2") { message } }"#,
            json!({}),
        )
        .await;
        assert_eq!(error_code(&update).as_deref(), Some("NOT_FOUND"));

        let delete = run(
            &schema,
            r#"mutation { deleteEmployee(empId: "E2") { message } }"#,
            json!({}),
        )
        .await;
        assert_eq!(error_code(&delete).as_deref(), Some("NOT_FOUND"));
    }

    #[tokio::test]
    async fn save_all_then_me_resolves_employee() {
        let schema = schema();
        let saved = run(
            &schema,
            r#"mutation Save($rows: [EmployeeInput!]!) { saveAllEmployees(employees: $rows) { message } }"#,
            json!({"rows": [{"empId": "E1", "firstName": "Jo"}, {"empId": "E2"}]}),
        )
        .await;
        assert!(saved.errors.is_empty(), "{:?}", saved.errors);
        assert_eq!(
            saved.data.into_json().unwrap(),
            json!({"saveAllEmployees": {"message": "Saved 2 employees"}})
        );

        run(&schema, r#"mutation { setMeEmployeeId(empId: "E1") }"#, json!({})).await;
        let me = run(&schema, "{ me { empId employee { firstName } } }", json!({})).await;
        assert_eq!(
            me.data.into_json().unwrap(),
            json!({"me": {"empId": "E1", "employee": {"firstName": "Jo"}}})
        );

        run(&schema, r#"mutation { deleteEmployee(empId: "E1") { message } }"#, json!({})).await;
        let stale = run(&schema, "{ me { empId employee { firstName } } }", json!({})).await;
        assert_eq!(
            stale.data.into_json().unwrap(),
            json!({"me": {"empId": "E1", "employee": null}})
        );
    }

    #[tokio::test]
    async fn positions_are_normalized_on_save() {
        let schema = schema();
        let saved = run(
            &schema,
            r#"mutation { savePositionsList(positions: ["  A ", "", "B", "B"]) }"#,
            json!({}),
        )
        .await;
        assert!(saved.errors.is_empty(), "{:?}", saved.errors);
        let listed = run(&schema, "{ positionsList }", json!({})).await;
        assert_eq!(
            listed.data.into_json().unwrap(),
            json!({"positionsList": ["A", "B", "B"]})
        );
    }

    #[tokio::test]
    async fn photo_upload_validates_payload() {
        let schema = schema();
        let bad = run(
            &schema,
            r#"mutation { uploadEmployeePhoto(payload: "not-a-data-url", fileName: "x.png", empId: "E1") { url id } }"#,
            json!({}),
        )
        .await;
        assert_eq!(error_code(&bad).as_deref(), Some("INVALID_PAYLOAD"));

        let good = run(
            &schema,
            r#"mutation { uploadEmployeePhoto(payload: "data:image/png;base64,iVBORw0KGgo=", empId: "E1") { url id } }"#,
            json!({}),
        )
        .await;
        assert!(good.errors.is_empty(), "{:?}", good.errors);
        let body = good.data.into_json().unwrap();
        let id = body["uploadEmployeePhoto"]["id"].as_str().unwrap().to_string();
        assert_eq!(
            body["uploadEmployeePhoto"]["url"],
            json!(format!("http://roster.test/files/{id}"))
        );
    }

    #[tokio::test]
    async fn initialize_sheet_reports_state() {
        let schema = schema();
        let query = "mutation { initializeSheet { state notice } }";
        let first = run(&schema, query, json!({})).await;
        assert_eq!(
            first.data.into_json().unwrap(),
            json!({"initializeSheet": {"state": "CREATED", "notice": "Employee sheet created."}})
        );
        let second = run(&schema, query, json!({})).await;
        assert_eq!(
            second.data.into_json().unwrap()["initializeSheet"]["state"],
            json!("ALREADY_INITIALIZED")
        );
    }
}
