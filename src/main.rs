use anyhow::{bail, Context};
use clap::Parser;
use company_admin::app::build_store;
use company_admin::core::selectors;
use company_admin::utils::logger;
use company_admin::view::{CompaniesTable, EmployeesTable, FieldEdit};
use company_admin::{ActionOutcome, CliArgs, Command, DeleteTarget, NewCompany, NewEmployee};

fn report(action: &str, outcome: ActionOutcome) -> anyhow::Result<()> {
    match outcome {
        ActionOutcome::Fulfilled => {
            tracing::info!("✅ {} done", action);
            Ok(())
        }
        ActionOutcome::Declined { status } => {
            tracing::warn!("{}: service answered with status {}", action, status);
            println!("⚠️  {}: service answered with status {}", action, status);
            Ok(())
        }
        ActionOutcome::FellBack { message } => {
            println!("⚠️  {}: {} (showing local data)", action, message);
            Ok(())
        }
        ActionOutcome::Rejected { message } => bail!("{} failed: {}", action, message),
    }
}

fn print_companies(table: &CompaniesTable, store: &company_admin::Store) {
    let state = store.snapshot();
    println!("{:>4}  {:<28} {:>9}  Address", "Id", "Name", "Employees");
    for row in table.rows(&state) {
        println!(
            "{:>4}  {:<28} {:>9}  {}",
            row.id,
            row.name.value(),
            row.employee_count,
            row.address
        );
    }
}

fn print_employees(table: &EmployeesTable, store: &company_admin::Store) {
    let state = store.snapshot();
    println!("{:>4}  {:<24} {:<20} Company", "Id", "Name", "Position");
    for row in table.rows(&state) {
        let name = format!("{} {}", row.first_name.value(), row.last_name.value());
        println!(
            "{:>4}  {:<24} {:<20} {}",
            row.id,
            name.trim(),
            row.position.value(),
            row.company_name.as_deref().unwrap_or("-")
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = match args.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let level = config.logging.level.as_deref();
    if config.logging.json {
        logger::init_json_logger(level);
    } else {
        logger::init_cli_logger(args.verbose, level);
    }
    tracing::debug!("Resolved config: {:?}", config);

    let store = build_store(&config, args.offline).context("failed to set up the store")?;

    let (companies, employees) = store.bootstrap().await;
    report("Loading companies", companies)?;
    report("Loading employees", employees)?;

    match args.command {
        Command::Companies { filter } => {
            let mut table = CompaniesTable::new();
            table.set_filter(filter);
            print_companies(&table, &store);
        }
        Command::Employees { companies } => {
            let mut table = EmployeesTable::new();
            table.set_company_scope(&store.snapshot(), &companies);
            print_employees(&table, &store);
        }
        Command::AddCompany { name, address } => {
            let outcome = store.companies().add(NewCompany { name, address }).await;
            report("Adding company", outcome)?;
            print_companies(&CompaniesTable::new(), &store);
        }
        Command::RenameCompany { id, name } => {
            let table = CompaniesTable::new();
            let edit = FieldEdit {
                id,
                field: "name".to_string(),
                value: name,
            };
            report("Renaming company", table.commit_edit(&store, &edit).await)?;
            print_companies(&table, &store);
        }
        Command::DeleteCompanies { ids } => {
            let mut table = CompaniesTable::new();
            let state = store.snapshot();
            for id in ids {
                table.select(&state, id, true);
            }
            if table.selected(&state).is_empty() {
                bail!("none of the given companies exist");
            }
            report("Deleting companies", table.delete_selected(&store).await)?;
            print_companies(&table, &store);
        }
        Command::AddEmployee {
            company,
            first_name,
            last_name,
            position,
        } => {
            if !store.select(|state| state.company.contains(company)) {
                tracing::warn!("company {} is not in the loaded list", company);
            }
            let draft = NewEmployee {
                company_id: company,
                first_name,
                last_name,
                position,
            };
            report("Adding employee", store.employees().add(draft).await)?;
            let mut table = EmployeesTable::new();
            table.set_company_scope(&store.snapshot(), &[company]);
            print_employees(&table, &store);
        }
        Command::DeleteEmployees { ids } => {
            let outcome = store.employees().delete(DeleteTarget::Many(ids)).await;
            report("Deleting employees", outcome)?;
            print_employees(&EmployeesTable::new(), &store);
        }
    }

    if let Some(error) = store.select(|state| selectors::error(state).map(str::to_string)) {
        eprintln!("❌ {}", error);
    }

    Ok(())
}
