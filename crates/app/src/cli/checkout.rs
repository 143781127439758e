use clap::Args;
use ihram::{
    checkout::session_id_from_query,
    donations::DonationAmount,
    locale::Locale,
    orders::{OrderIdentity, remember_pending_order, take_pending_order},
};
use ihram_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Donation to add to the purchase, in EUR
    #[arg(long)]
    donation: Option<String>,

    /// Cover the payment processor's fees on the donation
    #[arg(long)]
    cover_fees: bool,

    /// Storefront language the customer is browsing in
    #[arg(long, default_value_t = Locale::En)]
    locale: Locale,
}

#[derive(Debug, Args)]
pub(crate) struct CheckoutReturnArgs {
    /// Query string of the success page, e.g. `session_id=cs_123`
    #[arg(long, default_value = "")]
    query: String,
}

pub(crate) async fn run(ctx: &AppContext, args: CheckoutArgs) -> Result<(), String> {
    let service = ctx.checkout().map_err(|error| error.to_string())?;
    let cart = ctx.cart();

    let donation = args
        .donation
        .as_deref()
        .map_or(DonationAmount::ZERO, DonationAmount::parse);

    let session = service
        .checkout_cart(&cart, donation, args.cover_fees, args.locale)
        .await
        .map_err(|error| format!("checkout failed: {error}"))?;

    let mut storage = ctx.storage.clone();

    match session.identity() {
        Some(identity) => {
            remember_pending_order(&mut storage, &identity)
                .map_err(|error| format!("failed to remember order: {error}"))?;

            print_identity(&identity);
        }
        None => {
            take_pending_order(&mut storage)
                .map_err(|error| format!("failed to forget previous order: {error}"))?;
        }
    }

    println!("checkout_url: {}", session.url);
    println!("the cart is kept until the payment completes");

    Ok(())
}

pub(crate) fn run_return(ctx: &AppContext, args: &CheckoutReturnArgs) -> Result<(), String> {
    let mut cart = ctx.cart();

    let cleared = cart
        .clear_after_payment(session_id_from_query(&args.query))
        .map_err(|error| format!("failed to clear cart: {error}"))?;

    if !cleared {
        println!("no checkout session in the return; cart kept");

        return Ok(());
    }

    println!("payment confirmed; cart cleared");

    let mut storage = ctx.storage.clone();

    let pending = take_pending_order(&mut storage)
        .map_err(|error| format!("failed to read order: {error}"))?;

    if let Some(identity) = pending {
        print_identity(&identity);
    } else {
        let reference = OrderIdentity::issue_now();

        println!("reference: {} (display only)", reference.order_number);
        println!("checkout returned no order credentials;");
        println!("this reference is not linked to a stored order and cannot be looked up");
    }

    Ok(())
}

fn print_identity(identity: &OrderIdentity) {
    println!("order_number: {}", identity.order_number);
    println!("lookup_token: {}", identity.lookup_token);
    println!("keep both; together they are the only way to look this order up");
}
