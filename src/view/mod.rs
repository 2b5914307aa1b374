// View models: what the table widgets show and the actions they dispatch.
// Drawing them is left to the caller.

pub mod companies_table;
pub mod employees_table;
pub mod selection;
pub mod text_field;

pub use companies_table::{CompaniesTable, CompanyField, CompanyRow};
pub use employees_table::{EmployeeRow, EmployeesTable};
pub use selection::Selection;
pub use text_field::{FieldEdit, TextField};
