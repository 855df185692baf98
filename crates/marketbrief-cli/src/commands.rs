use anyhow::Result;
use is_terminal::IsTerminal;

use crate::args::{Cli, Commands};
use crate::handlers;
use crate::presentation::DisplayOptions;

pub fn run(cli: Cli) -> Result<()> {
    let options = DisplayOptions {
        enable_color: !cli.no_color && std::io::stdout().is_terminal(),
    };

    match cli.command {
        Commands::Research {
            prompt,
            model,
            server_label,
            server_url,
            allowed_tools,
            ai_base_url,
        } => handlers::research::handle(
            handlers::research::Args {
                prompt,
                model,
                server_label,
                server_url,
                allowed_tools,
                ai_base_url,
            },
            &cli.output_dir,
            &options,
        ),

        Commands::Volume {
            start_date,
            end_date,
            theme,
            data_base_url,
        } => handlers::volume::handle(
            &start_date,
            &end_date,
            &theme,
            &data_base_url,
            &cli.output_dir,
        ),

        Commands::Download {
            document_id,
            data_base_url,
        } => handlers::download::handle(&document_id, &data_base_url, &cli.output_dir),
    }
}
