//! CLI runner - executes the pipeline

use crate::cli::commands::Cli;
use crate::engine::Pipeline;
use crate::error::Result;
use crate::loader::load_configuration;
use crate::output::print_headers;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the pipeline described by the command line
    pub async fn run(&self) -> Result<()> {
        info!(
            "Beginning task. Initializing using file {}",
            self.cli.config.display()
        );
        let config = load_configuration(&self.cli.config)?;
        let pipeline = Pipeline::new(config)?;

        info!("Requesting data from {}", pipeline.config().url());
        if self.cli.headers {
            let headers = pipeline.fetch_headers().await?;
            let stdout = std::io::stdout();
            return print_headers(&mut stdout.lock(), &headers);
        }

        let stats = pipeline.run(&self.cli.output).await?;
        info!(
            "Task complete: {} rows written to {}",
            stats.rows_written,
            self.cli.output.display()
        );
        Ok(())
    }
}
