use std::sync::Arc;

use chrono::Local;
use commit_dashboard::{
    api::GithubClient,
    config::{DashboardConfig, Env},
    render::Page,
    shell::Dashboard,
    widget::Context,
};
use shared::WeekWindow;
use tokio::{io::AsyncWriteExt, signal};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
    tracing::subscriber::set_global_default(subscriber)?;

    let env = Env::load()?;
    let config = match &env.config {
        Some(path) => DashboardConfig::load_from_file(path)?,
        None => DashboardConfig::default(),
    };

    let github = GithubClient::new(&config.api_base_url)?;
    let context = Context::new(Arc::new(github), config.marker.as_str());
    let dashboard = Dashboard::mount(context, &config.heading, config.repositories.clone());

    let snapshots = tokio::select! {
        snapshots = dashboard.settled() => snapshots,
        _ = signal::ctrl_c() => {
            warn!("Received SIGINT. Exiting.");
            return Ok(());
        }
    };

    let page = Page::new(
        dashboard.heading(),
        WeekWindow::current().label(),
        &snapshots,
        &Local,
    );
    info!("Rendering {} cards as {}", page.cards.len(), env.format);
    let output = env.format.render(&page)?;

    match &env.output {
        Some(path) => {
            tokio::fs::write(path, output).await?;
            info!("Dashboard written to {}", path.display());
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(output.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    Ok(())
}
