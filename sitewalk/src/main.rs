use sitewalk::commands::command_argument_builder;
use sitewalk::handlers::{handle_crawl, init_logging, usage_error_exit_code};

#[tokio::main]
async fn main() {
    let matches = match command_argument_builder().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => std::process::exit(usage_error_exit_code(&e)),
    };

    init_logging(matches.get_count("verbose"));

    let code = handle_crawl(&matches).await;
    std::process::exit(code);
}
