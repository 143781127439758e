use clap::{Args, Subcommand};
use ihram::locale::Locale;
use ihram_app::{
    context::AppContext,
    inquiries::{MosqueSupplyForm, PartnerInquiryForm},
};

#[derive(Debug, Args)]
pub(crate) struct InquiryCommand {
    #[command(subcommand)]
    command: InquirySubcommand,
}

#[derive(Debug, Subcommand)]
enum InquirySubcommand {
    /// Request Ihram sets for a mosque
    Mosque(MosqueArgs),

    /// Ask about partnership or wholesale
    Partner(PartnerArgs),
}

#[derive(Debug, Args)]
struct MosqueArgs {
    /// Name of the mosque
    #[arg(long)]
    mosque_name: String,

    /// Person making the request
    #[arg(long)]
    contact_name: String,

    /// Contact email
    #[arg(long)]
    email: String,

    /// Contact phone
    #[arg(long)]
    phone: Option<String>,

    /// City
    #[arg(long)]
    city: String,

    /// Country
    #[arg(long)]
    country: String,

    /// Number of Ihram sets
    #[arg(long, allow_negative_numbers = true)]
    quantity: i64,

    /// Additional message
    #[arg(long)]
    message: Option<String>,

    /// Language of the request
    #[arg(long, default_value_t = Locale::En)]
    locale: Locale,
}

#[derive(Debug, Args)]
struct PartnerArgs {
    /// Organisation name
    #[arg(long)]
    organisation: String,

    /// Person making the inquiry
    #[arg(long)]
    contact_name: String,

    /// Contact email
    #[arg(long)]
    email: String,

    /// Contact phone
    #[arg(long)]
    phone: Option<String>,

    /// Country
    #[arg(long)]
    country: String,

    /// Rough number of sets
    #[arg(long, allow_negative_numbers = true)]
    estimated_quantity: Option<i64>,

    /// The inquiry
    #[arg(long)]
    message: String,

    /// Language of the inquiry
    #[arg(long, default_value_t = Locale::En)]
    locale: Locale,
}

pub(crate) async fn run(ctx: &AppContext, command: InquiryCommand) -> Result<(), String> {
    let service = ctx.inquiries().map_err(|error| error.to_string())?;

    match command.command {
        InquirySubcommand::Mosque(args) => {
            let request = service
                .submit_mosque_request(&MosqueSupplyForm {
                    mosque_name: args.mosque_name,
                    contact_name: args.contact_name,
                    email: args.email,
                    phone: args.phone,
                    city: args.city,
                    country: args.country,
                    quantity: args.quantity,
                    message: args.message,
                    locale: args.locale,
                })
                .await
                .map_err(|error| format!("failed to submit request: {error}"))?;

            println!(
                "request for {} sets from {} received",
                request.quantity, request.mosque_name
            );
        }
        InquirySubcommand::Partner(args) => {
            let inquiry = service
                .submit_partner_inquiry(&PartnerInquiryForm {
                    organisation: args.organisation,
                    contact_name: args.contact_name,
                    email: args.email,
                    phone: args.phone,
                    country: args.country,
                    estimated_quantity: args.estimated_quantity,
                    message: args.message,
                    locale: args.locale,
                })
                .await
                .map_err(|error| format!("failed to submit inquiry: {error}"))?;

            println!("inquiry from {} received", inquiry.organisation);
        }
    }

    Ok(())
}
