// Interactive server/train chooser on stdin
use crate::application::catalog_service::CatalogService;
use crate::domain::selection::{RunNumber, Selection, ServerInfo};
use anyhow::{Context, bail};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Ask the user for a server and train, listing what the API reports.
pub async fn choose_selection(catalog: &CatalogService) -> anyhow::Result<Selection> {
    choose_from(catalog, BufReader::new(tokio::io::stdin())).await
}

async fn choose_from<R>(catalog: &CatalogService, input: R) -> anyhow::Result<Selection>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    let servers = catalog.active_servers().await?;
    if servers.is_empty() {
        bail!("No active servers reported by the API");
    }

    println!("Select server:");
    for (i, server) in servers.iter().enumerate() {
        println!("  {:>2}) {}", i + 1, server.name);
    }
    let server = loop {
        let line = next_line(&mut lines).await?;
        match pick_server(&line, &servers) {
            Some(server) => break server.clone(),
            None => println!("Please enter a number between 1 and {}", servers.len()),
        }
    };

    let trains = catalog.train_numbers(&server.code).await?;
    if trains.is_empty() {
        bail!("No trains running on server {}", server.name);
    }

    println!("Select train on {}:", server.name);
    for (i, train) in trains.iter().enumerate() {
        println!("  {:>3}) {}", i + 1, train);
    }
    let train = loop {
        let line = next_line(&mut lines).await?;
        match pick_train(&line, &trains) {
            Some(train) => break train,
            None => println!("Enter a list number or a run-number from the list"),
        }
    };

    Ok(Selection::new(server.code, train))
}

async fn next_line<R>(lines: &mut tokio::io::Lines<R>) -> anyhow::Result<String>
where
    R: AsyncBufRead + Unpin,
{
    lines
        .next_line()
        .await
        .context("Failed to read selection")?
        .context("Input closed before a selection was made")
}

fn pick_index(input: &str, len: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}

fn pick_server<'a>(input: &str, servers: &'a [ServerInfo]) -> Option<&'a ServerInfo> {
    pick_index(input, servers.len()).map(|i| &servers[i])
}

// An exact run-number wins over a list position. Only the typed line is
// trimmed; listed run-numbers are compared as the server sent them.
fn pick_train(input: &str, trains: &[RunNumber]) -> Option<RunNumber> {
    let typed = RunNumber::new(input.trim());
    if trains.contains(&typed) {
        return Some(typed);
    }
    pick_index(input, trains.len()).map(|i| trains[i].clone())
}
