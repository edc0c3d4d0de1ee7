use super::args::{Cli, Commands};
use super::handlers;
use anyhow::Result;
use pkglog_store::{is_privileged, Journal, ScopePolicy};

pub fn run(cli: Cli) -> Result<()> {
    // Every command resolves the effective scope first; a system
    // request without privilege downgrades to user with a warning.
    let policy = ScopePolicy::resolve(cli.scope, is_privileged());

    match cli.command {
        Commands::Setup => handlers::setup::handle(policy),

        Commands::Status => {
            let journal = Journal::open(policy);
            handlers::status::handle(&journal)
        }

        Commands::Log {
            action,
            name,
            manager,
            version,
        } => {
            let journal = Journal::open(policy);
            handlers::log::handle(&journal, action, &name, &manager, version)
        }

        Commands::Query {
            name,
            manager,
            since,
        } => {
            let journal = Journal::open(policy);
            handlers::query::handle(&journal, name, manager, since.as_deref())
        }

        Commands::Export { format } => {
            let journal = Journal::open(policy);
            handlers::export::handle(&journal, format)
        }

        Commands::Backends => handlers::backends::handle(),

        Commands::Daemon => handlers::daemon::handle(policy),
    }
}
