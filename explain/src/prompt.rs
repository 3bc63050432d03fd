//! Prompt construction for VaR-change explanations

/// Build the three-bullet risk-analyst prompt
///
/// The model is instructed to answer with exactly three bullets, each
/// starting with the bullet marker, and nothing else.
pub fn build_explain_prompt(
    var_today: f64,
    var_yesterday: f64,
    drivers: &[String],
    date: Option<&str>,
) -> String {
    let date = date.unwrap_or("today");
    format!(
        "You are a risk analyst. Produce exactly three bullets using the format \
         \u{1F539} <concise reason> (no extra text).\n\
         The first line must start with a bullet. Explain why the portfolio VAR on \
         {date} (${var_today:.2}) differs from the previous day (${var_yesterday:.2}). \
         Key drivers: {}.",
        drivers.join(", ")
    )
}
