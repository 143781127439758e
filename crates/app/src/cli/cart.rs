use clap::{Args, Subcommand};
use ihram::{cart::NewCartItem, money::format_amount};
use ihram_app::context::AppContext;
use rust_decimal::Decimal;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// List the cart's lines and totals
    Show,

    /// Add a product, merging with an existing line
    Add(AddArgs),

    /// Set a line's quantity; zero or less removes it
    Set(SetArgs),

    /// Remove a line
    Remove(RemoveArgs),

    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Product identifier
    #[arg(long)]
    id: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Unit price in EUR
    #[arg(long)]
    price: Decimal,

    /// Display image path
    #[arg(long)]
    image: Option<String>,

    /// Units to add
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    quantity: i64,
}

#[derive(Debug, Args)]
struct SetArgs {
    /// Product identifier
    #[arg(long)]
    id: String,

    /// New quantity
    #[arg(long, allow_negative_numbers = true)]
    quantity: i64,
}

#[derive(Debug, Args)]
struct RemoveArgs {
    /// Product identifier
    #[arg(long)]
    id: String,
}

pub(crate) fn run(ctx: &AppContext, command: CartCommand) -> Result<(), String> {
    let mut cart = ctx.cart();

    let result = match command.command {
        CartSubcommand::Show => Ok(()),
        CartSubcommand::Add(args) => cart.add_item(
            NewCartItem {
                id: args.id,
                name: args.name,
                image: args.image,
                price: args.price,
            },
            args.quantity,
        ),
        CartSubcommand::Set(args) => cart.update_quantity(&args.id, args.quantity),
        CartSubcommand::Remove(args) => cart.remove_item(&args.id),
        CartSubcommand::Clear => cart.clear(),
    };

    result.map_err(|error| format!("failed to update cart: {error}"))?;

    if cart.is_empty() {
        println!("cart is empty");
        return Ok(());
    }

    for line in cart.items() {
        println!(
            "{} x {} ({}) @ {} = {}",
            line.quantity,
            line.name,
            line.id,
            format_amount(line.price),
            format_amount(line.line_total())
        );
    }

    println!("items: {}", cart.total_items());
    println!("subtotal: {}", format_amount(cart.total_price()));

    Ok(())
}
