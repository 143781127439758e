use clap::Args;
use ihram::{
    donations::{DonationAmount, DonationDirection, DonationFrequency, DonationIntent},
    locale::Locale,
    money::format_amount,
};
use ihram_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct DonateArgs {
    /// Amount in EUR
    #[arg(long)]
    amount: String,

    /// one-time or monthly
    #[arg(long, default_value_t)]
    frequency: DonationFrequency,

    /// general-fund, pilgrim-garments or mosque-supplies
    #[arg(long, default_value_t)]
    direction: DonationDirection,

    /// Keep the donor's name out of acknowledgements
    #[arg(long)]
    anonymous: bool,

    /// Email a receipt to this address
    #[arg(long)]
    receipt_email: Option<String>,

    /// Cover the payment processor's fees
    #[arg(long)]
    cover_fees: bool,

    /// Storefront language the donor is browsing in
    #[arg(long, default_value_t = Locale::En)]
    locale: Locale,
}

pub(crate) async fn run(ctx: &AppContext, args: DonateArgs) -> Result<(), String> {
    let service = ctx.checkout().map_err(|error| error.to_string())?;

    let intent = DonationIntent {
        amount: DonationAmount::parse(&args.amount),
        frequency: args.frequency,
        direction: args.direction,
        anonymous: args.anonymous,
        wants_receipt: args.receipt_email.is_some(),
        receipt_email: args.receipt_email,
        cover_fees: args.cover_fees,
    };

    let session = service
        .donate(&intent, args.locale)
        .await
        .map_err(|error| format!("donation failed: {error}"))?;

    let charged = intent
        .amount
        .total(intent.cover_fees, service.composer().fees());

    println!("amount: {}", format_amount(charged));
    println!("checkout_url: {}", session.url);

    Ok(())
}
