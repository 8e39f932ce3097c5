use super::connect_store;
use crate::components::movie_card::movie_table;
use crate::loading::LoadingIndicator;
use crate::output::Output;
use cinereview_core::{ListController, ListState};
use color_eyre::Result;
use owo_colors::OwoColorize;

pub async fn run_movies(output: &Output) -> Result<()> {
    tracing::debug!("Movies command started");
    let store = connect_store()?;
    let mut controller = ListController::new(store);

    let loading = LoadingIndicator::start("Loading movies...", output.is_human() && !output.is_quiet());
    controller.load().await;
    loading.finish();

    render_list(controller.state(), output)
}

fn render_list(state: &ListState, output: &Output) -> Result<()> {
    if !output.is_human() {
        output.json(&serde_json::to_value(state)?);
        return Ok(());
    }

    let page = match state {
        ListState::Ready(page) => page,
        ListState::Loading => return Ok(()),
    };

    output.println(format!("\n{}", "CineReview".bright_cyan().bold()));
    output.println("Discover and review the greatest films of all time".dimmed().to_string());
    output.println("");
    output.println("Featured Movies".bold().to_string());

    if page.load_failed {
        output.warn("Could not load movies. Check the store settings with `cinereview config show`.");
    } else if page.entries.is_empty() {
        output.info("No movies available yet.");
    } else {
        output.println(movie_table(&page.entries).to_string());
        output.info("Open a movie with `cinereview movie <ID>`.");
    }
    Ok(())
}
