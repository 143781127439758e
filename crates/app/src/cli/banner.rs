use clap::{Args, Subcommand};
use ihram::preferences::{banner_dismissed, dismiss_banner, reset_banner};
use ihram_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct BannerCommand {
    #[command(subcommand)]
    command: BannerSubcommand,
}

#[derive(Debug, Subcommand)]
enum BannerSubcommand {
    /// Show whether the banner is dismissed
    Status,

    /// Dismiss the banner
    Dismiss,

    /// Show the banner again
    Reset,
}

pub(crate) fn run(ctx: &AppContext, command: &BannerCommand) -> Result<(), String> {
    let mut storage = ctx.storage.clone();

    match command.command {
        BannerSubcommand::Status => {}
        BannerSubcommand::Dismiss => dismiss_banner(&mut storage)
            .map_err(|error| format!("failed to dismiss banner: {error}"))?,
        BannerSubcommand::Reset => reset_banner(&mut storage)
            .map_err(|error| format!("failed to reset banner: {error}"))?,
    }

    if banner_dismissed(&storage) {
        println!("banner: dismissed");
    } else {
        println!("banner: shown");
    }

    Ok(())
}
