use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use signup_wizard::submission::{InMemoryBackend, RegistrationBackend};
use signup_wizard::validation::Field;
use signup_wizard::wizard::{StepView, WizardController, WizardStep};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    eprintln!("Signup wizard v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   <field> <value>   type into a field (email, name, password)");
    eprintln!("   submit            press the submit button");
    eprintln!("   back              go back one step");
    eprintln!("   quit              leave");

    let backend: Arc<dyn RegistrationBackend> = InMemoryBackend::new();
    let mut wizard = WizardController::new(backend);
    eprintln!("   Session: {}", wizard.session_id());
    eprintln!("   Submission timeout: {:?}\n", wizard.config().submission_timeout);

    render(&wizard.view());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "quit" | "/quit" => break,
            "submit" => {
                if let Err(e) = wizard.on_submit_click().await {
                    tracing::debug!("Submit did not advance: {}", e);
                }
            }
            "back" => {
                wizard.on_back_click();
            }
            _ => {
                let (name, value) = line.split_once(' ').unwrap_or((line, ""));
                let Some(field) = Field::from_name(name) else {
                    eprintln!("Unknown command: {name}");
                    continue;
                };
                // The email row can reappear on the info step; it still
                // belongs to the email form.
                let step = if field == Field::Email {
                    WizardStep::Email
                } else {
                    wizard.current_step()
                };
                // Typing then leaving the input: change followed by blur.
                let result = wizard
                    .on_field_change(step, field, value)
                    .and_then(|_| wizard.on_field_blur(step, field));
                if let Err(e) = result {
                    eprintln!("{e}");
                    continue;
                }
            }
        }

        render(&wizard.view());
        if wizard.current_step().is_terminal() {
            break;
        }
    }

    Ok(())
}

fn render(view: &StepView) {
    println!();
    if view.can_go_back {
        println!("< back");
    }
    if let Some(title) = view.title {
        println!("## {title}");
    }
    if let Some(banner) = view.banner {
        println!("# {banner}");
    }
    if let Some(ref intro) = view.intro {
        println!("{intro}");
    }
    if let Some(ref err) = view.submission_error {
        println!("!! {err}");
    }
    for row in &view.fields {
        let shown = if row.secret {
            "*".repeat(row.value.chars().count())
        } else {
            row.value.clone()
        };
        println!("{} {}", row.label, shown);
        if let Some(ref message) = row.error {
            println!("   {message}");
        }
    }
    if !view.step.is_terminal() {
        println!("[ {} ]", view.button_label);
    }
}
