//! TrimGo CLI
//!
//! Command-line client for a running TrimGo API:
//! - Browse salons and join a queue
//! - Watch your ticket
//! - Run the salon dashboard
//! - Generate a config file

use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "trimgo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Live salon queues from the command line")]
#[command(long_about = "TrimGo shows live salon waiting lists.\nFind a salon with a short line, take a ticket, or run the queue as the salon.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8086", global = true)]
    pub api_url: String,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show server status
    Status,

    /// List salons
    Salons {
        /// Match against salon name or area
        #[arg(short, long)]
        search: Option<String>,
        /// All, Unisex, men-only, women-only
        #[arg(short, long)]
        category: Option<String>,
        /// waiting, rating or distance
        #[arg(long, default_value = "waiting")]
        sort: String,
    },

    /// Join a salon's queue
    Join {
        /// Salon ID
        salon_id: u64,
    },

    /// Show your ticket
    Ticket,

    /// Cancel your ticket
    Cancel,

    /// Show the salon dashboard
    Dashboard,

    /// Accept a booking request
    Accept {
        /// Request ID
        id: u64,
    },

    /// Reject a booking request
    Reject {
        /// Request ID
        id: u64,
    },

    /// Seat a waiting customer
    Start {
        /// Customer ID
        id: u64,
    },

    /// Finish the service in the chair
    Complete,

    /// Toggle accepting / offline
    Toggle,

    /// Show or change the current view
    View {
        /// View tag (e.g., salon-dashboard)
        view: Option<String>,
    },

    /// List registered users
    Users,

    /// Create a customer account
    RegisterUser {
        /// Full name
        name: String,
    },

    /// List a new salon
    RegisterSalon {
        name: String,
        area: String,
        #[arg(long, default_value = "")]
        city: String,
        /// Unisex, men-only or women-only
        #[arg(short = 't', long = "type")]
        salon_type: Option<String>,
    },

    /// Log out to the home screen
    Logout,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let api = format!("{}/api/v1", cli.api_url);

    match cli.command {
        Commands::Status => {
            let response = client.get(format!("{}/health", cli.api_url)).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: Value = resp.json().await?;

                    println!("TrimGo v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!("API Status: {}", health["status"].as_str().unwrap_or("unknown"));
                    println!("View: {}", health["view"].as_str().unwrap_or("-"));
                    println!("Salons: {}", health["salons"].as_u64().unwrap_or(0));
                    println!(
                        "Live connections: {}",
                        health["ws_connections"].as_u64().unwrap_or(0)
                    );

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to TrimGo API at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the TrimGo API server is running:");
                    eprintln!("  cargo run --bin trimgo-api");
                    std::process::exit(1);
                }
            }
        }

        Commands::Salons {
            search,
            category,
            sort,
        } => {
            let mut query = vec![("sort", sort)];
            if let Some(search) = search {
                query.push(("search", search));
            }
            if let Some(category) = category {
                query.push(("category", category));
            }

            let data = expect_json(
                client.get(format!("{}/salons", api)).query(&query),
                "Listing salons",
            )
            .await?;

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&data)?),
                "csv" => print_salons_csv(&data)?,
                _ => print_salons_table(&data),
            }
        }

        Commands::Join { salon_id } => {
            let body = serde_json::json!({ "salon_id": salon_id });
            let ticket = expect_json(client.post(format!("{}/ticket", api)).json(&body), "Join").await?;
            print_value_or(&cli.format, &ticket, |t| {
                println!("Joined queue for {}", t["salon_name"].as_str().unwrap_or("-"));
                print_ticket(t);
            })?;
        }

        Commands::Ticket => {
            let response = client.get(format!("{}/ticket", api)).send().await?;
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                println!("No active ticket.");
                println!();
                println!("Join a queue with:");
                println!("  trimgo-cli join <salon_id>");
                return Ok(());
            }
            let ticket = ensure_success(response, "Ticket").await?.json::<Value>().await?;
            print_value_or(&cli.format, &ticket, print_ticket)?;
        }

        Commands::Cancel => {
            expect_success(client.delete(format!("{}/ticket", api)), "Cancel").await?;
            println!("Ticket cancelled");
        }

        Commands::Dashboard => {
            let data = expect_json(client.get(format!("{}/dashboard", api)), "Dashboard").await?;
            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&data)?),
                "csv" => print_queue_csv(&data)?,
                _ => print_dashboard(&data),
            }
        }

        Commands::Accept { id } => {
            let customer = expect_json(
                client.post(format!("{}/dashboard/requests/{}/accept", api, id)),
                "Accept",
            )
            .await?;
            print_value_or(&cli.format, &customer, |c| {
                println!(
                    "Accepted {} ({}), est. wait {} min",
                    c["name"].as_str().unwrap_or("-"),
                    c["service"].as_str().unwrap_or("-"),
                    c["wait_time"].as_u64().unwrap_or(0)
                );
            })?;
        }

        Commands::Reject { id } => {
            expect_success(
                client.post(format!("{}/dashboard/requests/{}/reject", api, id)),
                "Reject",
            )
            .await?;
            println!("Rejected request {}", id);
        }

        Commands::Start { id } => {
            let customer = expect_json(
                client.post(format!("{}/dashboard/queue/{}/start", api, id)),
                "Start",
            )
            .await?;
            print_value_or(&cli.format, &customer, |c| {
                println!(
                    "In the chair: {} ({})",
                    c["name"].as_str().unwrap_or("-"),
                    c["service"].as_str().unwrap_or("-")
                );
            })?;
        }

        Commands::Complete => {
            let response = expect_success(
                client.post(format!("{}/dashboard/chair/complete", api)),
                "Complete",
            )
            .await?;

            if response.status() == reqwest::StatusCode::NO_CONTENT {
                println!("Chair is empty, nothing to complete.");
                return Ok(());
            }

            let done: Value = response.json().await?;
            print_value_or(&cli.format, &done, |d| {
                println!(
                    "Completed {}: +₹{}",
                    d["customer"]["name"].as_str().unwrap_or("-"),
                    d["customer"]["price"].as_u64().unwrap_or(0)
                );
                println!(
                    "Revenue ₹{} | Customers {}",
                    d["stats"]["revenue"].as_u64().unwrap_or(0),
                    d["stats"]["customers"].as_u64().unwrap_or(0)
                );
            })?;
        }

        Commands::Toggle => {
            let data = expect_json(client.post(format!("{}/dashboard/online", api)), "Toggle").await?;
            let online = data["online"].as_bool().unwrap_or(false);
            println!("{}", if online { "Accepting" } else { "Offline" });
        }

        Commands::View { view } => {
            let request = match view {
                Some(view) => client
                    .put(format!("{}/view", api))
                    .json(&serde_json::json!({ "view": view })),
                None => client.get(format!("{}/view", api)),
            };
            let data = expect_json(request, "View").await?;
            print_value_or(&cli.format, &data, |v| {
                println!("View: {}", v["view"].as_str().unwrap_or("-"));
            })?;
        }

        Commands::Users => {
            let data = expect_json(client.get(format!("{}/users", api)), "Listing users").await?;
            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&data)?),
                "csv" => print_users_csv(&data)?,
                _ => print_users_table(&data),
            }
        }

        Commands::RegisterUser { name } => {
            let body = serde_json::json!({ "name": name });
            let user = expect_json(client.post(format!("{}/users", api)).json(&body), "Register").await?;
            print_value_or(&cli.format, &user, |u| {
                println!(
                    "Account created: {} <{}>",
                    u["name"].as_str().unwrap_or("-"),
                    u["email"].as_str().unwrap_or("-")
                );
            })?;
        }

        Commands::RegisterSalon {
            name,
            area,
            city,
            salon_type,
        } => {
            let body = serde_json::json!({
                "name": name,
                "area": area,
                "city": city,
                "type": salon_type,
            });
            let salon = expect_json(client.post(format!("{}/salons", api)).json(&body), "Register").await?;
            print_value_or(&cli.format, &salon, |s| {
                println!(
                    "Salon registered: {} (ID {}), pending verification",
                    s["name"].as_str().unwrap_or("-"),
                    s["id"].as_u64().unwrap_or(0)
                );
            })?;
        }

        Commands::Logout => {
            expect_json(client.post(format!("{}/logout", api)), "Logout").await?;
            println!("Logged out successfully");
        }

        Commands::Config { output } => {
            let config = trimgo::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Send a request and exit with the API's error message on failure
async fn expect_success(
    request: reqwest::RequestBuilder,
    action: &str,
) -> Result<reqwest::Response, Box<dyn std::error::Error>> {
    let response = request.send().await?;
    ensure_success(response, action).await
}

async fn expect_json(
    request: reqwest::RequestBuilder,
    action: &str,
) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(expect_success(request, action).await?.json().await?)
}

async fn ensure_success(
    response: reqwest::Response,
    action: &str,
) -> Result<reqwest::Response, Box<dyn std::error::Error>> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or(text);

    eprintln!("{} failed ({}): {}", action, status, message);
    std::process::exit(1);
}

fn print_value_or(
    format: &str,
    value: &Value,
    human: impl FnOnce(&Value),
) -> Result<(), serde_json::Error> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human(value);
    }
    Ok(())
}

fn print_ticket(ticket: &Value) {
    println!(
        "Ticket #{} at {}",
        ticket["number"].as_u64().unwrap_or(0),
        ticket["salon_name"].as_str().unwrap_or("-")
    );
    println!("Time left: ~{} min", ticket["minutes_left"].as_u64().unwrap_or(0));
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

fn rows(data: &Value, key: &str) -> Vec<Value> {
    data[key].as_array().cloned().unwrap_or_default()
}

fn text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

fn print_salons_table(data: &Value) {
    let salons = rows(data, "salons");
    if salons.is_empty() {
        println!("No salons match.");
        return;
    }

    println!(
        "{:<4} {:<28} {:<15} {:<11} {:<8} {:<8} {:<6} {:<7} {}",
        "ID", "Name", "Area", "Type", "Dist", "Waiting", "ETA", "Rating", "Free"
    );
    println!("{}", "-".repeat(98));

    for s in salons {
        println!(
            "{:<4} {:<28} {:<15} {:<11} {:<8} {:<8} {:<6} {:<7} {}",
            text(&s["id"]),
            text(&s["name"]),
            text(&s["area"]),
            text(&s["type"]),
            text(&s["distance"]),
            text(&s["waiting"]),
            format!("{}m", text(&s["eta"])),
            text(&s["rating"]),
            text(&s["chairs_free"])
        );
    }
}

fn print_salons_csv(data: &Value) -> Result<(), Box<dyn std::error::Error>> {
    let columns = [
        "id", "name", "area", "city", "type", "distance", "waiting", "eta", "rating", "reviews",
        "chairs_free",
    ];
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer.write_record(columns)?;
    for s in rows(data, "salons") {
        writer.write_record(columns.iter().map(|k| text(&s[*k])))?;
    }
    writer.flush()?;
    Ok(())
}

fn print_users_table(data: &Value) {
    println!("{:<5} {:<22} {:<30} {:<12} {}", "ID", "Name", "Email", "Joined", "Status");
    println!("{}", "-".repeat(80));
    for u in rows(data, "users") {
        println!(
            "{:<5} {:<22} {:<30} {:<12} {}",
            text(&u["id"]),
            text(&u["name"]),
            text(&u["email"]),
            text(&u["joined"]),
            text(&u["status"])
        );
    }
}

fn print_users_csv(data: &Value) -> Result<(), Box<dyn std::error::Error>> {
    let columns = ["id", "name", "email", "joined", "status"];
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer.write_record(columns)?;
    for u in rows(data, "users") {
        writer.write_record(columns.iter().map(|k| text(&u[*k])))?;
    }
    writer.flush()?;
    Ok(())
}

fn print_dashboard(data: &Value) {
    let online = data["online"].as_bool().unwrap_or(false);
    println!("Status: {}", if online { "Accepting" } else { "Offline" });
    println!(
        "Revenue ₹{} | Customers {} | Avg wait {} min",
        text(&data["stats"]["revenue"]),
        text(&data["stats"]["customers"]),
        text(&data["stats"]["wait_time"])
    );

    println!();
    match data["chair"].as_object() {
        Some(_) => println!(
            "In the chair: {} ({}, ₹{})",
            text(&data["chair"]["name"]),
            text(&data["chair"]["service"]),
            text(&data["chair"]["price"])
        ),
        None => println!("Chair is free"),
    }

    let requests = rows(data, "requests");
    println!();
    println!("Requests ({})", requests.len());
    for r in requests {
        println!(
            "  [{}] {:<18} {:<18} ₹{:<6} {}",
            text(&r["id"]),
            text(&r["name"]),
            text(&r["service"]),
            text(&r["price"]),
            text(&r["time"])
        );
    }

    let queue = rows(data, "queue");
    println!();
    println!("Queue ({})", queue.len());
    for c in queue {
        println!(
            "  {}. [{}] {:<18} {:<18} ~{} min",
            text(&c["position"]),
            text(&c["id"]),
            text(&c["name"]),
            text(&c["service"]),
            text(&c["wait_time"])
        );
    }
}

fn print_queue_csv(data: &Value) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    let columns = ["position", "id", "name", "service", "status", "wait_time", "price"];
    writer.write_record(columns)?;
    for c in rows(data, "queue") {
        writer.write_record(columns.iter().map(|k| text(&c[*k])))?;
    }
    writer.flush()?;
    Ok(())
}
