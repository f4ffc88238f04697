//! Payment request CLI commands
//!
//! `create` runs the same wizard the TUI uses, on a manual clock, so a
//! one-shot command follows the same validation and idle-hide rules.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{
    format_payment_details, format_receipt, format_request_details, format_request_list,
};
use crate::error::{BuzzPayError, BuzzPayResult};
use crate::models::{PaymentMethod, PaymentRequest};
use crate::services::{
    RequestService, ShareOutcome, ShareService, SystemClipboard, SystemShareTarget,
    VerificationOutcome, VerificationService,
};
use crate::storage::Storage;
use crate::wizard::{request_wizard, ManualClock};

/// Request subcommands
#[derive(Subcommand)]
pub enum RequestCommands {
    /// Create a payment request
    Create {
        /// Your name
        #[arg(long)]
        sender: String,
        /// Your phone number
        #[arg(long)]
        sender_phone: String,
        /// Name of the person who should pay
        #[arg(long)]
        recipient: String,
        /// Their phone number
        #[arg(long)]
        recipient_phone: String,
        /// Amount (e.g. "25.50")
        #[arg(long)]
        amount: String,
        /// What the money is for
        #[arg(short, long)]
        description: Option<String>,
        /// Print the message without opening WhatsApp
        #[arg(long)]
        no_share: bool,
    },
    /// List all requests, newest first
    List,
    /// Show request details
    Show {
        /// Request ID or unique prefix
        id: String,
    },
    /// Verify a phone number against a request
    Verify {
        /// Request ID or unique prefix
        id: String,
        /// Phone number to check
        phone: String,
    },
    /// Pay a request
    Pay {
        /// Request ID or unique prefix
        id: String,
        /// Payment method (card, mobile, bank)
        #[arg(short, long, default_value = "card")]
        method: String,
    },
    /// Show the receipt of a paid request
    Receipt {
        /// Request ID or unique prefix
        id: String,
    },
    /// Set the note on a request (empty text clears it)
    Note {
        /// Request ID or unique prefix
        id: String,
        /// Note text
        text: String,
    },
    /// Cancel an open request
    Cancel {
        /// Request ID or unique prefix
        id: String,
    },
    /// Share an existing request again
    Share {
        /// Request ID or unique prefix
        id: String,
    },
}

/// Handle a request command
pub fn handle_request_command(
    storage: &Storage,
    settings: &Settings,
    cmd: RequestCommands,
) -> BuzzPayResult<()> {
    let service = RequestService::new(storage);
    let sharer = ShareService::from_settings(settings);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        RequestCommands::Create {
            sender,
            sender_phone,
            recipient,
            recipient_phone,
            amount,
            description,
            no_share,
        } => {
            let mut wizard = request_wizard(&settings.wizard, ManualClock::new())?;
            let description = description.unwrap_or_default();
            let values = [
                sender,
                sender_phone,
                recipient,
                recipient_phone,
                amount,
                description,
            ];
            for (index, value) in values.into_iter().enumerate() {
                wizard.set_field_value(index, value)?;
                wizard.settle();
            }

            let request = service.submit(&wizard)?;

            println!("Created request: {}", request.id);
            println!();
            println!("{}", sharer.message(&request));

            if !no_share {
                println!();
                share(&sharer, &request)?;
            }
        }

        RequestCommands::List => {
            let requests = service.list()?;
            print!("{}", format_request_list(&requests, currency));
        }

        RequestCommands::Show { id } => {
            let request = service.find(&id)?;
            print!("{}", format_request_details(&request, currency));
            println!("  Link:        {}", sharer.link(&request));
        }

        RequestCommands::Verify { id, phone } => {
            let request = service.find(&id)?;
            let mut session = VerificationService::new(storage).open_session(
                &request.id,
                &settings.wizard,
                ManualClock::new(),
            )?;
            session.set_phone(phone)?;

            match session.verify()? {
                VerificationOutcome::Verified => {
                    println!("Phone verified.");
                    println!();
                    print!("{}", format_payment_details(session.request(), currency));
                }
                VerificationOutcome::Sender => {
                    println!("This is your own request.");
                    println!();
                    print!("{}", format_receipt(session.request(), currency));
                }
                VerificationOutcome::Mismatch => {
                    return Err(BuzzPayError::Validation(
                        "Phone number does not match this request".into(),
                    ));
                }
            }
        }

        RequestCommands::Pay { id, method } => {
            let method: PaymentMethod = method.parse().map_err(BuzzPayError::InvalidArgument)?;
            let request = service.find(&id)?;
            let paid = service.pay(&request.id, method)?;

            println!("Payment successful.");
            println!();
            print!("{}", format_receipt(&paid, currency));
        }

        RequestCommands::Receipt { id } => {
            let request = service.find(&id)?;
            if !request.is_paid() {
                return Err(BuzzPayError::Validation(format!(
                    "Request {} has not been paid (status: {})",
                    request.id.short(),
                    request.status
                )));
            }
            print!("{}", format_receipt(&request, currency));
        }

        RequestCommands::Note { id, text } => {
            let request = service.find(&id)?;
            let updated = service.add_note(&request.id, &text)?;
            match updated.note {
                Some(note) => println!("Note saved: {}", note),
                None => println!("Note cleared."),
            }
        }

        RequestCommands::Cancel { id } => {
            let request = service.find(&id)?;
            let cancelled = service.cancel(&request.id)?;
            println!("Cancelled request: {}", cancelled.id);
        }

        RequestCommands::Share { id } => {
            let request = service.find(&id)?;
            println!("{}", sharer.message(&request));
            println!();
            share(&sharer, &request)?;
        }
    }

    Ok(())
}

fn share(sharer: &ShareService, request: &PaymentRequest) -> BuzzPayResult<()> {
    let mut clipboard = SystemClipboard;
    match sharer.share(request, &SystemShareTarget, &mut clipboard)? {
        ShareOutcome::Opened { url } => println!("Opened WhatsApp: {}", url),
        ShareOutcome::Copied { notice } => println!("{}", notice),
    }
    Ok(())
}
