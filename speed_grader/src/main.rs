use std::fs::{File, create_dir_all};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use speed_grader::{HttpTransport, SubmissionRecord, SubmissionsByStudentsFetcher};
use util::config::{self, AppConfig};

#[derive(Parser, Debug)]
#[command(version, about = "Fetch the submissions of a set of students in a course")]
struct Args {
    /// Course to query
    #[arg(long)]
    course_id: String,
    /// Student to include; repeat for several students
    #[arg(long = "student-id")]
    student_ids: Vec<String>,
    /// GraphQL endpoint, overrides GRAPHQL_URL
    #[arg(long)]
    endpoint: Option<String>,
    /// Bearer token, overrides API_TOKEN
    #[arg(long)]
    token: Option<String>,
    /// Also write the JSON result to this path
    #[arg(long)]
    out: Option<String>,
    /// Log filter, overrides LOG_LEVEL
    #[arg(long)]
    log_level: Option<String>,
    /// Mirror logs to stdout, overrides LOG_TO_STDOUT
    #[arg(long)]
    log_stdout: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(endpoint) = &args.endpoint {
        AppConfig::set_graphql_url(endpoint.clone());
    }
    if let Some(token) = &args.token {
        AppConfig::set_api_token(token.clone());
    }
    if let Some(level) = &args.log_level {
        AppConfig::set_log_level(level.clone());
    }
    if args.log_stdout {
        AppConfig::set_log_to_stdout(true);
    }

    let _log_guard = common::logger::init_logging(
        "logs",
        &config::log_file(),
        &config::log_level(),
        config::log_to_stdout(),
    );

    let transport = HttpTransport::from_config().context("building GraphQL transport")?;
    tracing::info!(endpoint = transport.endpoint(), "{} starting", config::project_name());

    let fetcher = SubmissionsByStudentsFetcher::new(transport);
    let nodes = fetcher
        .fetch(args.course_id.as_str(), args.student_ids.iter().cloned())
        .await
        .with_context(|| format!("fetching submissions for course {}", args.course_id))?;

    if nodes.is_none() {
        eprintln!("Course or submissions not found");
    }

    println!("{}", serde_json::to_string_pretty(&nodes)?);

    if let Some(out) = &args.out {
        save_json(&nodes, out)?;
        eprintln!("Saved result to {out}");
    }

    Ok(())
}

fn save_json(nodes: &Option<Vec<SubmissionRecord>>, path_str: &str) -> Result<()> {
    let path = Path::new(path_str);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let file = File::create(path).with_context(|| format!("creating {path_str}"))?;
    serde_json::to_writer_pretty(file, nodes).context("writing JSON")?;
    Ok(())
}
