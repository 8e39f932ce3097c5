use super::{connect_store, prompts};
use crate::components::review_card::review_card;
use crate::components::review_form::{apply_inputs, form_status, prompt_review_form};
use crate::components::star_rating::{colored_stars, filled_stars, rating_label, review_count_label};
use crate::loading::{is_interactive, LoadingIndicator};
use crate::output::Output;
use cinereview_core::{DetailController, DetailPage, DetailState, Notifier, SubmitOutcome};
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;
use std::sync::Arc;

/// Values passed on the command line for the review form
pub struct ReviewArgs {
    pub name: Option<String>,
    pub rating: Option<u8>,
    pub text: Option<String>,
}

fn detail_controller(movie_id: String, output: &Output) -> Result<DetailController> {
    let store = connect_store()?;
    let notifier: Arc<dyn Notifier> = Arc::new(output.clone());
    Ok(DetailController::new(store, notifier, movie_id))
}

async fn load_detail(controller: &mut DetailController, output: &Output) {
    let loading = LoadingIndicator::start("Loading movie details...", output.is_human() && !output.is_quiet());
    controller.load().await;
    loading.finish();
}

pub async fn run_movie(movie_id: String, output: &Output) -> Result<()> {
    tracing::debug!(movie_id = %movie_id, "Movie command started");
    let mut controller = detail_controller(movie_id, output)?;
    load_detail(&mut controller, output).await;
    render_detail(controller.state(), output)
}

pub async fn run_review(movie_id: String, args: ReviewArgs, output: &Output) -> Result<()> {
    tracing::debug!(movie_id = %movie_id, "Review command started");
    let mut controller = detail_controller(movie_id, output)?;
    load_detail(&mut controller, output).await;

    if !matches!(controller.state(), DetailState::Ready(_)) {
        return render_detail(controller.state(), output);
    }

    let interactive = is_interactive() && output.is_human();
    apply_inputs(controller.draft_mut(), args.name.as_deref(), args.rating, args.text.as_deref());

    if interactive {
        render_detail(controller.state(), output)?;
        if args.rating.is_none() || args.text.is_none() {
            output.println(format!("\n{}", "Write a Review".bold()));
            prompt_review_form(controller.draft_mut())?;
        }
    }

    loop {
        output.println(form_status(controller.draft()));

        match controller.submit().await {
            SubmitOutcome::Submitted(review) => {
                if output.is_human() {
                    return render_detail(controller.state(), output);
                }
                output.json(&json!({
                    "submitted": serde_json::to_value(&review)?,
                    "page": serde_json::to_value(controller.state())?,
                }));
                return Ok(());
            }
            SubmitOutcome::Rejected(_) if interactive => {
                prompt_review_form(controller.draft_mut())?;
            }
            SubmitOutcome::Failed(_) if interactive && prompts::prompt_yes_no("Try again?", Some(true))? => {}
            SubmitOutcome::NotReady => return render_detail(controller.state(), output),
            SubmitOutcome::Rejected(_) | SubmitOutcome::Failed(_) => {
                return Err(color_eyre::eyre::eyre!("Review was not submitted"));
            }
        }
    }
}

fn render_detail(state: &DetailState, output: &Output) -> Result<()> {
    if !output.is_human() {
        output.json(&serde_json::to_value(state)?);
        return Ok(());
    }

    match state {
        DetailState::Loading => {}
        DetailState::Ready(page) => render_page(page, output),
        DetailState::NotFound => {
            output.error("Movie not found");
            output.info("Back to movies: `cinereview movies`");
        }
        DetailState::Error { message } => {
            output.error(format!("Could not load this movie: {}", message));
        }
    }
    Ok(())
}

fn render_page(page: &DetailPage, output: &Output) {
    let movie = &page.movie;
    let aggregate = &page.aggregate;

    output.println(format!("\n{}", movie.title.bright_cyan().bold()));
    output.println(movie.release_year.to_string().dimmed().to_string());
    output.println(format!("Poster: {}", movie.poster().unwrap_or("No Image")));
    output.println("");

    output.println("Overall Rating".bold().to_string());
    output.println(format!(
        "{}  {}",
        colored_stars(filled_stars(aggregate.mean)),
        rating_label(aggregate).bold()
    ));
    output.println(format!("Based on {}", review_count_label(aggregate.count)).dimmed().to_string());
    output.println("");

    output.println("Synopsis".bold().to_string());
    output.println(&movie.description);
    output.println("");

    output.println(format!("User Reviews ({})", page.reviews.len()).bold().to_string());
    if page.reviews.is_empty() {
        output.println("No reviews yet. Be the first to review this movie!");
        return;
    }
    for review in &page.reviews {
        output.println("");
        output.println(review_card(review));
    }
}
