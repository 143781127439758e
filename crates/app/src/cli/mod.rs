use clap::{Parser, Subcommand};
use ihram_app::{config::AppConfig, context::AppContext};

mod banner;
mod cart;
mod checkout;
mod donate;
mod inquiry;
mod order;
mod quote;

#[derive(Debug, Parser)]
#[command(name = "ihram", about = "Ihram storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Inspect and change the cart
    Cart(cart::CartCommand),

    /// Price the cart with shipping and an optional donation
    Quote(quote::QuoteArgs),

    /// Start a hosted checkout for the cart
    Checkout(checkout::CheckoutArgs),

    /// Handle the return from a completed payment
    CheckoutReturn(checkout::CheckoutReturnArgs),

    /// Start a hosted checkout for a donation
    Donate(donate::DonateArgs),

    /// Issue or look up guest orders
    Order(order::OrderCommand),

    /// Submit a mosque-supply request or partner inquiry
    Inquiry(inquiry::InquiryCommand),

    /// Show or change the promotional banner preference
    Banner(banner::BannerCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let ctx = AppContext::from_config(&self.config)
            .map_err(|error| format!("failed to initialise: {error}"))?;

        match self.command {
            Commands::Cart(command) => cart::run(&ctx, command),
            Commands::Quote(args) => quote::run(&ctx, args),
            Commands::Checkout(args) => checkout::run(&ctx, args).await,
            Commands::CheckoutReturn(args) => checkout::run_return(&ctx, &args),
            Commands::Donate(args) => donate::run(&ctx, args).await,
            Commands::Order(command) => order::run(&ctx, command).await,
            Commands::Inquiry(command) => inquiry::run(&ctx, command).await,
            Commands::Banner(command) => banner::run(&ctx, &command),
        }
    }
}
