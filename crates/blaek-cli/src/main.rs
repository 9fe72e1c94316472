mod client;
mod store;
mod view;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::{ApiClient, CreateBlogRequest};
use std::time::Duration;
use store::{Action, Store};
use uuid::Uuid;

const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(name = "blaek", version, about = "Blæk CLI - blog platform client")]
struct Cli {
    /// Server URL
    #[arg(long, env = "BLAEK_URL", default_value = "http://localhost:8080")]
    server: String,

    /// Access token for protected routes (printed by `blaek login`)
    #[arg(long, env = "BLAEK_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and print an access token
    Login { username: String, password: String },
    /// Register a new user
    Register {
        username: String,
        password: String,
        /// Display name
        #[arg(long)]
        name: Option<String>,
    },
    /// List blog posts
    Blogs,
    /// Create a blog post
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        url: String,
        #[arg(long)]
        likes: Option<i64>,
    },
    /// Vote for a blog post
    Like {
        /// Blog id
        id: String,
    },
    /// Delete a blog post
    Remove {
        /// Blog id
        id: String,
    },
    /// List users with the blogs they created
    Users,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let client = ApiClient::new(&cli.server, cli.token.as_deref());
    let store = Store::new();

    match cli.command {
        Commands::Login { username, password } => {
            cmd_login(&client, &username, &password).await?;
        }
        Commands::Register {
            username,
            password,
            name,
        } => {
            cmd_register(&client, &username, name.as_deref(), &password).await?;
        }
        Commands::Blogs => {
            cmd_blogs(&client, &store).await?;
        }
        Commands::Add {
            title,
            author,
            url,
            likes,
        } => {
            let req = CreateBlogRequest {
                title,
                author,
                url,
                likes,
            };
            cmd_add(&client, &store, req).await?;
        }
        Commands::Like { id } => {
            cmd_like(&client, &store, &id).await?;
        }
        Commands::Remove { id } => {
            cmd_remove(&client, &store, &id).await?;
        }
        Commands::Users => {
            cmd_users(&client).await?;
        }
    }

    Ok(())
}

fn parse_id(id: &str) -> Result<Uuid> {
    id.parse().context("Invalid blog id")
}

/// Print the current store state: notification banner, then the list with an
/// optional per-row note supplied for the highlighted entry.
fn render(store: &Store, highlight: Option<Uuid>, note: &str) {
    let state = store.snapshot();
    if let Some(banner) = view::notification(&state) {
        println!("{}", banner);
        println!();
    }
    print!(
        "{}",
        view::blog_table(&state.blogs, |b| {
            (Some(b.id) == highlight).then(|| note.to_string())
        })
    );
}

async fn cmd_login(client: &ApiClient, username: &str, password: &str) -> Result<()> {
    let resp = client.login(username, password).await?;
    println!(
        "Logged in as {} ({})",
        resp.username,
        resp.name.as_deref().unwrap_or("-")
    );
    println!();
    println!("export BLAEK_TOKEN={}", resp.token);
    Ok(())
}

async fn cmd_register(
    client: &ApiClient,
    username: &str,
    name: Option<&str>,
    password: &str,
) -> Result<()> {
    let user = client.register(username, name, password).await?;
    println!("Registered {} ({})", user.username, user.id);
    Ok(())
}

async fn cmd_blogs(client: &ApiClient, store: &Store) -> Result<()> {
    let blogs = client.list_blogs().await?;
    store.dispatch(Action::BlogsLoaded(blogs));
    render(store, None, "");
    Ok(())
}

async fn cmd_add(client: &ApiClient, store: &Store, req: CreateBlogRequest) -> Result<()> {
    let blogs = client.list_blogs().await?;
    store.dispatch(Action::BlogsLoaded(blogs));

    let created = client.create_blog(&req).await?;
    let created_id = created.id;
    store.notify(&format!("added '{}'", created.title), NOTIFICATION_TTL);
    store.dispatch(Action::BlogAdded(created));

    render(store, Some(created_id), "<- new");
    Ok(())
}

async fn cmd_like(client: &ApiClient, store: &Store, id: &str) -> Result<()> {
    let blog_id = parse_id(id)?;
    let blogs = client.list_blogs().await?;
    store.dispatch(Action::BlogsLoaded(blogs));

    let current = store
        .snapshot()
        .blogs
        .iter()
        .find(|b| b.id == blog_id)
        .cloned()
        .context("No blog with that id")?;

    let updated = client.update_likes(blog_id, current.likes + 1).await?;
    store.notify(&format!("you voted '{}'", updated.title), NOTIFICATION_TTL);
    store.dispatch(Action::BlogUpdated(updated));

    render(store, Some(blog_id), "<- voted");
    Ok(())
}

async fn cmd_remove(client: &ApiClient, store: &Store, id: &str) -> Result<()> {
    let blog_id = parse_id(id)?;
    let blogs = client.list_blogs().await?;
    store.dispatch(Action::BlogsLoaded(blogs));

    let doomed = store
        .snapshot()
        .blogs
        .iter()
        .find(|b| b.id == blog_id)
        .cloned()
        .context("No blog with that id")?;

    client.delete_blog(blog_id).await?;
    store.notify(&format!("removed '{}'", doomed.title), NOTIFICATION_TTL);
    store.dispatch(Action::BlogRemoved(blog_id));

    render(store, None, "");
    Ok(())
}

async fn cmd_users(client: &ApiClient) -> Result<()> {
    let users = client.list_users().await?;
    print!("{}", view::user_table(&users));
    Ok(())
}
