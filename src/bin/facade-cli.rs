use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "facade-cli")]
#[command(about = "Command-line client for the employee facade", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8111")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every employee
    List,
    /// Search employees whose name contains QUERY (case-sensitive)
    Search { query: String },
    /// Show one employee
    Get { id: String },
    /// Show the highest salary
    HighestSalary,
    /// Show the names of the ten best-paid employees
    TopEarners,
    /// Create an employee
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        salary: u32,
        #[arg(long)]
        age: u32,
        #[arg(long)]
        title: String,
        #[arg(long)]
        email: String,
    },
    /// Delete an employee by id
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = reqwest::Url::parse(&cli.url)?;

    let res = match cli.command {
        Commands::List => client.get(endpoint(&base, &["employees"])).send().await?,
        Commands::Search { query } => {
            client.get(endpoint(&base, &["employees", "search", &query])).send().await?
        }
        Commands::Get { id } => client.get(endpoint(&base, &["employees", &id])).send().await?,
        Commands::HighestSalary => {
            client.get(endpoint(&base, &["employees", "highest-salary"])).send().await?
        }
        Commands::TopEarners => {
            client.get(endpoint(&base, &["employees", "top-ten-earners"])).send().await?
        }
        Commands::Create { name, salary, age, title, email } => {
            let body = json!({
                "name": name,
                "salary": salary,
                "age": age,
                "title": title,
                "email": email,
            });
            client.post(endpoint(&base, &["employees"])).json(&body).send().await?
        }
        Commands::Delete { id } => {
            client.delete(endpoint(&base, &["employees", &id])).send().await?
        }
    };

    print_response(res).await
}

/// Append percent-encoded path segments to the facade base URL.
fn endpoint(base: &reqwest::Url, segments: &[&str]) -> reqwest::Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: facade returned status {}", status);
        if !text.is_empty() {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
