use anyhow::Result;
use paymatrix_cli::{command, execute, init_logging, LogFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = command().get_matches();

    let level = matches
        .get_one::<String>("log-level")
        .map_or("info", String::as_str);
    let format = matches
        .get_one::<String>("log-format")
        .map_or(LogFormat::Text, |f| LogFormat::from_arg(f));
    init_logging(level, format)?;

    let mut stdout = std::io::stdout().lock();
    execute(&matches, &mut stdout).await
}
