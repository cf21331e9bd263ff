//! hrdash CLI - employee store and HR dashboard data

use clap::{Parser, Subcommand};
use hrdash::aggregate::{self, GroupStat};
use hrdash::config::{self, HrdashConfig};
use hrdash::dataset::{self, DEFAULT_SAMPLE_SIZE, DEFAULT_SEED};
use hrdash::employee;
use hrdash::server::{self, AppState};
use hrdash::ui::{self, Icons};
use hrdash::{DashboardFilter, DashboardReport, EmployeeStore, StoreConfig};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "hrdash")]
#[command(version)]
#[command(about = "HR analytics backend - employee store and dashboard panel data")]
#[command(long_about = r#"
hrdash keeps an employee store and computes the data behind an HR dashboard:
  • Headcount, gender and performance overviews
  • Age and tenure demographics
  • Attrition rates by department, role, satisfaction and rating
  • Compensation summaries

Example usage:
  hrdash init
  hrdash report --department IT,HR --format json
  hrdash employees --group-by Department --mean Salary
  hrdash serve --port 8501
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the database file (overrides HRDASH_DATABASE and hrdash.toml)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the employee table and seed it once
    Init {
        /// Number of generated employees to seed
        #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
        sample: usize,

        /// Random seed for the generated employees
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Only create the schema
        #[arg(long)]
        no_seed: bool,
    },

    /// Show stored employees, optionally grouped
    Employees {
        /// Columns to group by (display names, e.g. Department)
        #[arg(short, long, value_delimiter = ',')]
        group_by: Vec<String>,

        /// Average this column per group instead of counting
        #[arg(short, long)]
        mean: Option<String>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Print the dashboard panels for a filter selection
    Report {
        /// Departments to include; pass the flag with no value to select none
        #[arg(long, value_delimiter = ',', num_args = 0..)]
        department: Option<Vec<String>>,

        /// Job roles to include
        #[arg(long, value_delimiter = ',', num_args = 0..)]
        job_role: Option<Vec<String>>,

        /// Genders to include
        #[arg(long, value_delimiter = ',', num_args = 0..)]
        gender: Option<Vec<String>>,

        /// Performance ratings to include
        #[arg(long, value_delimiter = ',', num_args = 0..)]
        performance: Option<Vec<i64>>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Size of the generated dataset
        #[arg(long)]
        sample: Option<usize>,

        /// Random seed for the generated dataset
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },

    /// Serve the dashboard data over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Size of the generated dataset
        #[arg(long)]
        sample: Option<usize>,

        /// Random seed for the generated dataset
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },

    /// Manage hrdash.toml
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a starter config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let file_config = config::load_config(cli.config.as_deref())?;
    let store_config = config::resolve_store(
        cli.database.as_deref(),
        |k| std::env::var(k).ok(),
        file_config.as_ref(),
    );
    let configured_sample = file_config
        .as_ref()
        .and_then(|c| c.sample_size)
        .unwrap_or(DEFAULT_SAMPLE_SIZE);

    match cli.command {
        Commands::Init { sample, seed, no_seed } => {
            let store = open_store(&store_config)?;
            ui::header("Initializing employee store");
            ui::info("Database", &store.path().display().to_string());

            let records = (!no_seed).then(|| employee::sample_records(sample, seed));
            match store.initialize(records.as_deref()) {
                Ok(outcome) if outcome.seeded > 0 => {
                    ui::success(&format!("Seeded {} employees", outcome.seeded));
                }
                Ok(outcome) if outcome.seed_requested => {
                    ui::success(&format!(
                        "Store already populated ({} employees), seed skipped",
                        store.count()?
                    ));
                }
                Ok(_) => ui::success("Schema ready"),
                Err(e) => {
                    ui::error(&format!("Initialization failed ({:?}): {}", e.kind(), e));
                    return Err(e.into());
                }
            }
        }

        Commands::Employees { group_by, mean, format } => {
            let store = EmployeeStore::new(store_config);
            if !store.path().exists() {
                ui::warn("No employees stored. Run `hrdash init` first.");
                return Ok(());
            }
            let table = store.fetch_all()?;
            let json = format == "json";

            if group_by.is_empty() {
                if json {
                    println!("{}", serde_json::to_string_pretty(&table.to_records())?);
                } else if table.is_empty() {
                    ui::warn("No employees stored. Run `hrdash init` first.");
                } else {
                    println!("{}", ui::dataset_table(&table));
                    ui::info("Employees", &table.len().to_string());
                }
                return Ok(());
            }

            let cols: Vec<&str> = group_by.iter().map(String::as_str).collect();
            let (metric, stats) = match &mean {
                Some(col) => (format!("Mean {}", col), aggregate::mean_by(&table, &cols, col)?),
                None => ("Count".to_string(), aggregate::count_by(&table, &cols)?),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("{}", ui::group_table(&group_by.join(" / "), &metric, &stats, |v| format!("{:.1}", v)));
            }
        }

        Commands::Report {
            department,
            job_role,
            gender,
            performance,
            format,
            sample,
            seed,
        } => {
            let table = dataset::sample_table(sample.unwrap_or(configured_sample), seed);
            let filter = DashboardFilter {
                departments: department,
                job_roles: job_role,
                genders: gender,
                performance,
            };
            let report = DashboardReport::build(&filter.apply(&table)?)?;

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }

        Commands::Serve { port, sample, seed } => {
            let port = port
                .or_else(|| file_config.as_ref().and_then(|c| c.port))
                .unwrap_or(config::DEFAULT_PORT);
            let n = sample.unwrap_or(configured_sample);

            let store = open_store(&store_config)?;
            let seed_records = employee::sample_records(n, seed);
            let store = match store.initialize(Some(&seed_records)) {
                Ok(_) => Some(store),
                Err(e) => {
                    tracing::warn!("Employee store unavailable, serving generated data only: {}", e);
                    None
                }
            };

            let state = AppState {
                dataset: dataset::sample_table(n, seed),
                store,
            };

            tokio::runtime::Runtime::new()?.block_on(server::start_server(port, state))?;
        }

        Commands::Config { action: ConfigAction::Init { force } } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            let starter = HrdashConfig {
                database: Some(config::default_database_path().display().to_string()),
                port: Some(config::DEFAULT_PORT),
                sample_size: Some(DEFAULT_SAMPLE_SIZE),
            };
            config::write_config(&path, &starter, force)?;
            ui::success(&format!("Wrote {}", path.display()));
        }
    }

    Ok(())
}

fn open_store(store_config: &StoreConfig) -> anyhow::Result<EmployeeStore> {
    config::ensure_db_dir(&store_config.path)?;
    Ok(EmployeeStore::new(store_config.clone()))
}

fn pct(v: f64) -> String {
    format!("{:.1}%", v)
}

fn one_decimal(v: f64) -> String {
    format!("{:.1}", v)
}

fn counts(v: f64) -> String {
    format!("{}", v as usize)
}

fn print_groups(title: &str, key: &str, metric: &str, stats: &[GroupStat], fmt: fn(f64) -> String) {
    ui::section(title);
    if stats.is_empty() {
        println!("  (no employees selected)");
    } else {
        println!("{}", ui::group_table(key, metric, stats, fmt));
    }
}

fn print_report(report: &DashboardReport) {
    let kpis = &report.overview.kpis;

    ui::section("Overview");
    ui::metric(Icons::PEOPLE, "Total Employees", &kpis.total_employees.to_string());
    ui::metric(Icons::PERSON, "Active Employees", &kpis.active_employees.to_string());
    ui::metric(Icons::EXIT, "Attrition Rate", &pct(kpis.attrition_rate));
    ui::metric(Icons::STAR, "Avg Performance", &format!("{:.1}/5", kpis.avg_performance));
    ui::metric(Icons::STATS, "Avg Satisfaction", &format!("{:.1}/4", kpis.avg_satisfaction));
    ui::metric(
        Icons::INFO,
        "Departments / Job Roles",
        &format!("{} / {}", report.summary.departments, report.summary.job_roles),
    );

    print_groups("Employees by Department", "Department", "Count", &report.overview.headcount_by_department, counts);
    print_groups("Gender Breakdown", "Gender", "Count", &report.overview.gender_breakdown, counts);
    print_groups(
        "Average Performance by Department",
        "Department",
        "Rating",
        &report.overview.performance_by_department,
        one_decimal,
    );
    ui::section("Salary Spread by Department");
    println!("{}", ui::summary_table("Department", &report.overview.salary_by_department, ui::dollars));

    ui::section("Age Distribution by Gender");
    println!("{}", ui::crosstab_table("Age Group", &report.demographics.age_by_gender));
    print_groups("Employee Tenure", "Years of Service", "Count", &report.demographics.tenure_distribution, counts);
    ui::section("Job Roles by Department");
    println!("{}", ui::crosstab_table("Department", &report.demographics.roles_by_department));

    ui::section("Performance Rating Distribution");
    let distribution = &report.performance.rating_distribution;
    let most = distribution.iter().map(|r| r.count).max().unwrap_or(0);
    for r in distribution {
        ui::rating_line(r.rating, r.label, r.count, most);
    }
    print_groups(
        "Average Performance by Job Role",
        "Job Role",
        "Rating",
        &report.performance.performance_by_role,
        one_decimal,
    );

    print_groups("Attrition by Department", "Department", "Rate", &report.attrition.by_department, pct);
    print_groups("Attrition by Job Role", "Job Role", "Rate", &report.attrition.by_job_role, pct);
    print_groups("Attrition by Job Satisfaction", "Satisfaction", "Rate", &report.attrition.by_satisfaction, pct);
    print_groups("Attrition by Performance", "Rating", "Rate", &report.attrition.by_performance, pct);

    ui::section("Compensation");
    match &report.compensation.salary {
        Some(s) => {
            ui::metric(Icons::MONEY, "Average Salary", &ui::dollars(s.mean));
            ui::metric(Icons::MONEY, "Median Salary", &ui::dollars(s.median));
            ui::metric(
                Icons::MONEY,
                "Salary Range",
                &format!("{} - {}", ui::dollars(s.min), ui::dollars(s.max)),
            );
        }
        None => println!("  (no employees selected)"),
    }
    print_groups("Salary by Department", "Department", "Average", &report.compensation.by_department, ui::dollars);
    print_groups("Salary by Job Role", "Job Role", "Average", &report.compensation.by_job_role, ui::dollars);
    print_groups(
        "Salary by Department and Gender",
        "Department / Gender",
        "Average",
        &report.compensation.by_department_gender,
        ui::dollars,
    );
    ui::section("Salary Spread by Performance Rating");
    println!("{}", ui::summary_table("Rating", &report.compensation.by_performance, ui::dollars));
}
