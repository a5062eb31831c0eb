//! `sdoc`: serve, prerender and inspect a collection-based documentation site.

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, RoutesArgs, ServeArgs, TocArgs};
use output::Output;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Route, serve and prerender collection-based documentation.
#[derive(Parser)]
#[command(name = "sdoc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the page API server.
    Serve(ServeArgs),
    /// Build the static site.
    Build(BuildArgs),
    /// List every route the static build renders.
    Routes(RoutesArgs),
    /// Print the table of contents of a markdown file as JSON.
    Toc(TocArgs),
}

fn main() {
    let cli = Cli::parse();

    // `serve -v` forces INFO; everything else honours RUST_LOG.
    let filter = match &cli.command {
        Commands::Serve(args) if args.verbose => EnvFilter::new("info"),
        _ => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let outcome = match cli.command {
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .expect("tokio runtime")
            .block_on(args.execute(VERSION)),
        Commands::Build(args) => args.execute(),
        Commands::Routes(args) => args.execute(),
        Commands::Toc(args) => args.execute(),
    };

    if let Err(err) = outcome {
        Output::new().error(&format!("error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_verbose() {
        let cli = Cli::try_parse_from(["sdoc", "serve", "--port", "8080", "-v"]).unwrap();

        assert!(matches!(cli.command, Commands::Serve(args) if args.verbose));
    }

    #[test]
    fn test_parse_toc_requires_file() {
        assert!(Cli::try_parse_from(["sdoc", "toc"]).is_err());
        assert!(Cli::try_parse_from(["sdoc", "toc", "page.md", "--dedupe"]).is_ok());
    }

    #[test]
    fn test_parse_routes_json() {
        assert!(Cli::try_parse_from(["sdoc", "routes", "--json"]).is_ok());
        assert!(
            Cli::try_parse_from(["sdoc", "routes", "--collection", "doc-sdk-rust"]).is_ok()
        );
    }
}
