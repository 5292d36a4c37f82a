use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use book_catalog_form::config::DEFAULT_LOG_FILTER;
use book_catalog_form::domain::BookView;
use book_catalog_form::models::{BookDraft, BookId, FormField};
use book_catalog_form::{BookForm, Config, FormState, HttpBookApi, TerminalView};

const HELP: &str = "\
commands:
  list          reload the book table
  submit        fill in the form and create (or update, while editing)
  edit <id>     load a book into the form
  cancel        leave edit mode
  delete <id>   delete a book
  help          show this help
  quit          exit";

/// Read one line from stdin; `None` on end of input
fn read_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    let read = tokio::task::block_in_place(|| io::stdin().lock().read_line(&mut line))?;
    Ok((read > 0).then_some(line))
}

/// Ask for every field, offering the current form value as default
fn prompt_draft(current: &BookDraft) -> io::Result<Option<BookDraft>> {
    let mut answers = Vec::with_capacity(FormField::ALL.len());

    for field in FormField::ALL {
        let default = current.value(field);
        let prompt = if default.is_empty() {
            format!("{}: ", field)
        } else {
            format!("{} [{}]: ", field, default)
        };

        let Some(answer) = read_line(&prompt)? else {
            return Ok(None);
        };
        let answer = answer.trim();
        answers.push(if answer.is_empty() {
            default.to_string()
        } else {
            answer.to_string()
        });
    }

    Ok(Some(BookDraft::collect(
        &answers[0],
        &answers[1],
        &answers[2],
        &answers[3],
        &answers[4],
    )))
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--base-url")
        && let Some(val) = args.get(pos + 1)
    {
        // SAFETY: no other threads read the environment yet
        unsafe { std::env::set_var("API_BASE_URL", val) };
    }
    let html = args.iter().any(|arg| arg == "--html");

    let config = Config::from_env();

    let api = match HttpBookApi::new(&config.api_base_url) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!("Failed to create backend client: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Using catalog backend at {}", api.base_url());

    let view = Arc::new(TerminalView::new(html));
    let form = BookForm::new(Arc::new(api), view.clone()).with_notice_delay(config.notice_dismiss);

    // Errors are already shown by the view; the loop keeps the prior state
    let _ = form.list().await;
    let mut state = FormState::Idle;

    loop {
        let line = match read_line("> ") {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read command: {}", e);
                break;
            }
        };

        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (None, _) => continue,
            (Some("list"), _) => {
                let _ = form.list().await;
            }
            (Some("submit"), _) => {
                let draft = match prompt_draft(&view.current_draft()) {
                    Ok(Some(draft)) => draft,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::error!("Failed to read form: {}", e);
                        break;
                    }
                };
                // Typed values stay in the form if the submit fails
                view.fill_form(&draft);
                if let Ok(next) = form.submit(&state, draft).await {
                    state = next;
                }
            }
            (Some("edit"), Some(id)) => {
                if let Ok(next) = form.begin_edit(&BookId::from(id)).await {
                    state = next;
                }
            }
            (Some("cancel"), _) => state = form.cancel_edit(&state),
            (Some("delete"), Some(id)) => {
                let _ = form.remove(&BookId::from(id)).await;
            }
            (Some(cmd @ ("edit" | "delete")), None) => eprintln!("usage: {} <id>", cmd),
            (Some("help"), _) => println!("{}", HELP),
            (Some("quit" | "exit"), _) => break,
            (Some(other), _) => eprintln!("unknown command '{}', try `help`", other),
        }
    }
}
