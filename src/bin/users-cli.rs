use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "users-cli")]
#[command(about = "Management CLI for the user service", long_about = None)]
struct Cli {
    #[arg(short, long, env = "USER_SERVICE_URL", default_value = "http://localhost:3001")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every user
    List,
    /// List managers as {id, name}
    Managers,
    /// Look up a user by external (Google) id
    Get { google_user_id: String },
    /// Create a user
    Create {
        #[arg(long)]
        google_user_id: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        admin: bool,
        #[arg(long)]
        active: bool,
        #[arg(long)]
        manager: bool,
        #[arg(long)]
        manager_id: Option<i64>,
    },
    /// Set the admin flag
    SetAdmin {
        id: i64,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
    /// Set the active flag
    SetActive {
        id: i64,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
    /// Set the manager flag
    SetManager {
        id: i64,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
    /// Assign a manager; omit the manager id to clear it
    AssignManager { id: i64, manager_id: Option<i64> },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let api = format!("{}/api", cli.url.trim_end_matches('/'));

    let res = match cli.command {
        Commands::List => client.get(format!("{api}/users")).send().await?,
        Commands::Managers => client.get(format!("{api}/managers")).send().await?,
        Commands::Get { google_user_id } => {
            client.get(format!("{api}/users/{google_user_id}")).send().await?
        }
        Commands::Create {
            google_user_id,
            first_name,
            last_name,
            email,
            admin,
            active,
            manager,
            manager_id,
        } => {
            let body = json!({
                "google_user_id": google_user_id,
                "first_name": first_name,
                "last_name": last_name,
                "email": email,
                "is_admin": admin,
                "is_active": active,
                "is_manager": manager,
                "manager_id": manager_id,
            });
            client.post(format!("{api}/users")).json(&body).send().await?
        }
        Commands::SetAdmin { id, value } => {
            client
                .patch(format!("{api}/users/{id}/admin"))
                .json(&json!({ "is_admin": value }))
                .send()
                .await?
        }
        Commands::SetActive { id, value } => {
            client
                .patch(format!("{api}/users/{id}/active"))
                .json(&json!({ "is_active": value }))
                .send()
                .await?
        }
        Commands::SetManager { id, value } => {
            client
                .patch(format!("{api}/users/{id}/management"))
                .json(&json!({ "is_manager": value }))
                .send()
                .await?
        }
        Commands::AssignManager { id, manager_id } => {
            client
                .patch(format!("{api}/users/{id}/assign-manager"))
                .json(&json!({ "manager_id": manager_id }))
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: user service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
