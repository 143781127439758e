use clap::{Args, Subcommand};
use ihram::orders::OrderIdentity;
use ihram_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct OrderCommand {
    #[command(subcommand)]
    command: OrderSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrderSubcommand {
    /// Generate a sample order number and lookup token (display only)
    Issue,

    /// Look up an order by its number and lookup token
    Lookup(LookupArgs),
}

#[derive(Debug, Args)]
struct LookupArgs {
    /// Order number, e.g. ORD-20261018-K7Q2Z
    #[arg(long)]
    number: String,

    /// Lookup token given at checkout
    #[arg(long, env = "ORDER_LOOKUP_TOKEN", hide_env_values = true)]
    token: String,
}

pub(crate) async fn run(ctx: &AppContext, command: OrderCommand) -> Result<(), String> {
    match command.command {
        OrderSubcommand::Issue => {
            let identity = OrderIdentity::issue_now();

            println!("order_number: {}", identity.order_number);
            println!("lookup_token: {}", identity.lookup_token);
            println!("display only: this pair is not linked to any stored order");

            Ok(())
        }
        OrderSubcommand::Lookup(args) => {
            let service = ctx.orders().map_err(|error| error.to_string())?;

            let order = service
                .lookup(&args.number, &args.token)
                .await
                .map_err(|error| format!("order lookup failed: {error}"))?;

            let rendered = serde_json::to_string_pretty(&order)
                .map_err(|error| format!("failed to render order: {error}"))?;

            println!("{rendered}");

            Ok(())
        }
    }
}
