use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, ValueEnum};
use pushsearch::{
    Message, Page, PushshiftClient, SessionController, dispatch, formatters::format_page,
    logging::init_tracing,
};

#[derive(Parser)]
#[command(
    name = "pushsearch",
    version,
    about = "Search historical Reddit comments and posts through the Pushshift API",
    long_about = None
)]
struct Cli {
    /// Free-text search term
    query: Option<String>,

    /// Only results by this author
    #[arg(short, long)]
    author: Option<String>,

    /// Only results from this subreddit
    #[arg(short, long)]
    subreddit: Option<String>,

    /// What to search for: Comments or Posts
    #[arg(long, default_value = "Comments")]
    search_for: String,

    /// Number of results per page (provider max applies)
    #[arg(short = 'n', long, default_value = "100")]
    size: String,

    /// Provider-side score filter expression, e.g. ">10 <100"
    #[arg(long)]
    score: Option<String>,

    /// Only results at or after this time (RFC3339 or YYYY-MM-DD)
    #[arg(long)]
    after: Option<String>,

    /// Only results before this time (RFC3339 or YYYY-MM-DD)
    #[arg(long)]
    before: Option<String>,

    /// Extra continuation pages to fetch after the first
    #[arg(short, long, default_value = "0")]
    pages: u32,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("{raw} is not an RFC3339 timestamp or YYYY-MM-DD date"))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .context("date has no midnight")?;
    Ok(midnight.and_utc())
}

/// Bail with the session's pending error, if any. Field validation and
/// query failures both land in the same place.
fn check_session(controller: &SessionController) -> Result<()> {
    if let Some(err) = &controller.state().last_error {
        bail!("{}", err.message);
    }
    Ok(())
}

fn print_results(page: &Page, format: OutputFormat, use_color: bool) -> Result<()> {
    match format {
        OutputFormat::Text => {
            if page.is_empty() {
                println!("No results found.");
            } else {
                println!("{} results:\n", page.len());
                println!("{}", format_page(page, use_color));
            }
        }
        OutputFormat::Json => {
            let output = match page {
                Page::Comments(items) => serde_json::json!({
                    "search_for": "Comments",
                    "returned_count": items.len(),
                    "results": items,
                }),
                Page::Posts(items) => serde_json::json!({
                    "search_for": "Posts",
                    "returned_count": items.len(),
                    "results": items,
                }),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let after = cli.after.as_deref().map(parse_time).transpose()?;
    let before = cli.before.as_deref().map(parse_time).transpose()?;

    let mut controller = SessionController::new();

    // Feed the raw inputs through the controller's field updates so the
    // same validation applies as in any other frontend.
    controller.update(Message::SearchTargetChanged(cli.search_for.clone()));
    check_session(&controller)?;
    controller.update(Message::ResultSizeChanged(cli.size.clone()));
    if let Some(author) = cli.author.clone() {
        controller.update(Message::AuthorChanged(author));
    }
    if let Some(subreddit) = cli.subreddit.clone() {
        controller.update(Message::SubredditChanged(subreddit));
    }
    if let Some(score) = cli.score.clone() {
        controller.update(Message::ScoreFilterChanged(score));
    }
    if let Some(query) = cli.query.clone() {
        controller.update(Message::QueryTextChanged(query));
    }
    controller.update(Message::AfterChanged(after));
    controller.update(Message::BeforeChanged(before));

    let client = PushshiftClient::new()?;

    dispatch(&mut controller, &client, Message::SearchRequested).await;
    check_session(&controller)?;

    for _ in 0..cli.pages {
        if !controller.can_load_more() {
            break;
        }
        dispatch(&mut controller, &client, Message::MoreRequested).await;
        check_session(&controller)?;
    }

    let state = controller.state();
    let page = state
        .results
        .as_ref()
        .context("search finished without a result page")?;
    print_results(page, cli.format, !cli.no_color)?;
    Ok(())
}
