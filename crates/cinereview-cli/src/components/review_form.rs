use super::star_rating::stars;
use crate::commands::prompts;
use cinereview_core::{ReviewDraft, MAX_TEXT_LEN};
use color_eyre::Result;

/// Copy command-line values into the draft; the draft applies the length caps
pub fn apply_inputs(draft: &mut ReviewDraft, name: Option<&str>, rating: Option<u8>, text: Option<&str>) {
    if let Some(name) = name {
        draft.set_user_name(name);
    }
    if let Some(rating) = rating {
        draft.set_rating(rating);
    }
    if let Some(text) = text {
        draft.set_review_text(text);
    }
}

/// Interactive form, pre-filled with whatever the draft already holds
pub fn prompt_review_form(draft: &mut ReviewDraft) -> Result<()> {
    let name = prompts::prompt_string("Your Name (Optional, leave blank for Anonymous)", Some(draft.user_name()))?;
    draft.set_user_name(&name);

    let rating = prompts::prompt_rating("Your Rating", draft.rating())?;
    draft.set_rating(rating);

    let text = prompts::prompt_string("Your Review", Some(draft.review_text()))?;
    draft.set_review_text(&text);

    Ok(())
}

/// Summary line shown under the form
pub fn form_status(draft: &ReviewDraft) -> String {
    format!(
        "Rating: {}  |  {}/{} characters",
        stars(draft.rating()),
        draft.text_len(),
        MAX_TEXT_LEN
    )
}
