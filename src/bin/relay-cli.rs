use clap::{Parser, Subcommand, ValueEnum};
use iot_relay_sdk::{Api, ApiClient, ApiResponse, AuthRealm, ClientError, DeviceKind, Resource};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Operator CLI for the IoT admin backend, via the relay or directly", long_about = None)]
struct Cli {
    /// Relay mount (or backend API root) that catalog paths are joined to
    #[arg(short, long, default_value = "http://localhost:1678/api/proxy")]
    base_url: String,

    /// Bearer token for authenticated calls
    #[arg(short, long, env = "RELAY_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List records of a resource
    List {
        resource: ResourceArg,
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Fetch one record
    Get { resource: ResourceArg, id: String },
    /// Create a record from a JSON document
    Create {
        resource: ResourceArg,
        #[arg(short, long)]
        data: String,
    },
    /// Replace fields of a record from a JSON document
    Update {
        resource: ResourceArg,
        id: String,
        #[arg(short, long)]
        data: String,
    },
    /// Delete a record
    Delete { resource: ResourceArg, id: String },
    /// List active colors, optionally for one category
    Colors {
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Seed the default color palette
    SeedColors,
    /// Show a device's telemetry feed, or append a reading with --data
    Telemetry {
        kind: DeviceKindArg,
        id: String,
        #[arg(short, long)]
        data: Option<String>,
    },
    /// Show the dashboard summary
    Dashboard,
    /// Export a report
    Export {
        #[arg(value_name = "TYPE")]
        kind: String,
    },
    /// Log in and print the issued token
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long, value_enum, default_value_t = RealmArg::Standard)]
        realm: RealmArg,
    },
    /// Show the current user
    Me {
        #[arg(short, long, value_enum, default_value_t = RealmArg::Standard)]
        realm: RealmArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ResourceArg {
    Users,
    UsersImplementation,
    EndDevice,
    Gateway,
    Clients,
    Orders,
    Colors,
}

impl From<ResourceArg> for Resource {
    fn from(arg: ResourceArg) -> Self {
        match arg {
            ResourceArg::Users => Resource::Users,
            ResourceArg::UsersImplementation => Resource::UsersImplementation,
            ResourceArg::EndDevice => Resource::EndDevice,
            ResourceArg::Gateway => Resource::Gateway,
            ResourceArg::Clients => Resource::Clients,
            ResourceArg::Orders => Resource::Orders,
            ResourceArg::Colors => Resource::Colors,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DeviceKindArg {
    EndDevice,
    Gateway,
}

impl From<DeviceKindArg> for DeviceKind {
    fn from(arg: DeviceKindArg) -> Self {
        match arg {
            DeviceKindArg::EndDevice => DeviceKind::EndDevice,
            DeviceKindArg::Gateway => DeviceKind::Gateway,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RealmArg {
    Standard,
    Implementation,
}

impl From<RealmArg> for AuthRealm {
    fn from(arg: RealmArg) -> Self {
        match arg {
            RealmArg::Standard => AuthRealm::Standard,
            RealmArg::Implementation => AuthRealm::Implementation,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        if let Some(client_error) = e.downcast_ref::<ClientError>() {
            if let Some(detail) = client_error.detail() {
                eprintln!("Detail: {detail}");
            }
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut api = Api::new(ApiClient::new(&cli.base_url)?);
    if let Some(token) = cli.token {
        api = api.with_token(token);
    }

    let response = match cli.command {
        Commands::List { resource, limit } => api.resource(resource.into()).list(limit).await?,
        Commands::Get { resource, id } => api.resource(resource.into()).get(&id).await?,
        Commands::Create { resource, data } => {
            let data = parse_data(&data)?;
            api.resource(resource.into()).create(&data).await?
        }
        Commands::Update { resource, id, data } => {
            let data = parse_data(&data)?;
            api.resource(resource.into()).update(&id, &data).await?
        }
        Commands::Delete { resource, id } => api.resource(resource.into()).delete(&id).await?,
        Commands::Colors { category } => api.colors().list(category.as_deref()).await?,
        Commands::SeedColors => api.colors().seed_defaults().await?,
        Commands::Telemetry { kind, id, data } => {
            let telemetry = api.telemetry(kind.into());
            match data {
                Some(data) => telemetry.record(&id, &parse_data(&data)?).await?,
                None => telemetry.list(&id).await?,
            }
        }
        Commands::Dashboard => api.reports().dashboard().await?,
        Commands::Export { kind } => api.reports().export(&kind).await?,
        Commands::Login {
            username,
            password,
            realm,
        } => api.auth(realm.into()).login(&username, &password).await?,
        Commands::Me { realm } => api.auth(realm.into()).me().await?,
    };

    print_response(response)
}

fn parse_data(data: &str) -> Result<Value, Box<dyn std::error::Error>> {
    serde_json::from_str(data).map_err(|e| format!("--data is not valid JSON: {e}").into())
}

fn print_response(response: ApiResponse) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(&response.into_value())?);
    Ok(())
}
